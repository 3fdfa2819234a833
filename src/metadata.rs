use std::fs;
use std::path::Path;
use std::time::SystemTime;

use glob::glob;

use crate::error::FileError;

#[derive(Debug, Clone)]
pub struct FileMetadata {
    pub path: String,
    pub size: u64,
    pub modified_time: i64, // Unix timestamp in microseconds
    pub accessed_time: i64,
    pub created_time: i64,
    pub permissions: String,
    pub inode: u64,
    pub is_file: bool,
    pub is_dir: bool,
    pub is_symlink: bool,
}

/// Stat a single path.
///
/// Not-found and permission-denied come back as `Ok(None)` so callers can
/// probe for outputs that may not exist yet; other failures are errors.
pub fn stat_path(path: &Path) -> Result<Option<FileMetadata>, FileError> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(Some(build_metadata(path, &metadata))),
        Err(e) => {
            use std::io::ErrorKind;
            match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => Ok(None),
                _ => Err(FileError::from_io(path, e)),
            }
        }
    }
}

/// Stat every file matching a glob pattern.
pub fn stat_glob(pattern: &str) -> Result<Vec<FileMetadata>, FileError> {
    let entries = glob(pattern).map_err(|e| FileError::Pattern {
        pattern: pattern.to_string(),
        source: e,
    })?;

    let mut results = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            FileError::from_io(&path, e.into_error())
        })?;

        let metadata = fs::metadata(&path).map_err(|e| FileError::from_io(&path, e))?;
        results.push(build_metadata(&path, &metadata));
    }

    Ok(results)
}

fn build_metadata(path: &Path, metadata: &fs::Metadata) -> FileMetadata {
    let file_type = metadata.file_type();

    FileMetadata {
        path: path.to_string_lossy().to_string(),
        size: metadata.len(),
        modified_time: system_time_to_microseconds(
            metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
        ),
        accessed_time: system_time_to_microseconds(
            metadata.accessed().unwrap_or(SystemTime::UNIX_EPOCH),
        ),
        created_time: system_time_to_microseconds(
            metadata.created().unwrap_or(SystemTime::UNIX_EPOCH),
        ),
        permissions: format_permissions(metadata),
        inode: get_inode(metadata),
        is_file: file_type.is_file(),
        is_dir: file_type.is_dir(),
        is_symlink: file_type.is_symlink(),
    }
}

fn system_time_to_microseconds(time: SystemTime) -> i64 {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros() as i64
}

fn format_permissions(metadata: &fs::Metadata) -> String {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        format!("{:o}", metadata.permissions().mode())
    }

    #[cfg(windows)]
    {
        if metadata.permissions().readonly() {
            "r--r--r--".to_string()
        } else {
            "rw-rw-rw-".to_string()
        }
    }
}

fn get_inode(metadata: &fs::Metadata) -> u64 {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        metadata.ino()
    }

    #[cfg(windows)]
    {
        0 // Windows doesn't have inodes
    }
}
