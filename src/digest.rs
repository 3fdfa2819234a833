use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::FileError;

const MAX_CHUNK_SIZE: usize = 8 * 1024 * 1024;

/// Streaming SHA-256 of a file's contents as lowercase hex.
///
/// Returns `Ok(None)` when the file does not exist or cannot be accessed,
/// so callers probing an output path do not have to special-case the first
/// run. Other I/O failures are real errors.
pub fn file_sha256(path: &Path) -> Result<Option<String>, FileError> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            return match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => Ok(None),
                _ => Err(FileError::from_io(path, e)),
            }
        }
    };

    let mut hasher = Sha256::new();

    // Adaptive chunk strategy: 1MB -> 2MB -> 4MB -> 8MB max
    let mut chunk_size = 1024 * 1024;
    loop {
        let mut buffer = vec![0u8; chunk_size];
        let bytes_read = file
            .read(&mut buffer)
            .map_err(|e| FileError::from_io(path, e))?;

        if bytes_read == 0 {
            break; // EOF
        }

        hasher.update(&buffer[..bytes_read]);

        if chunk_size < MAX_CHUNK_SIZE {
            chunk_size = std::cmp::min(chunk_size * 2, MAX_CHUNK_SIZE);
        }
    }

    Ok(Some(format!("{:x}", hasher.finalize())))
}

/// SHA-256 of in-memory content, lowercase hex.
pub fn content_sha256(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_hash_format() {
        let hash = content_sha256(b"hello\nworld");
        assert_eq!(hash.len(), 64, "SHA256 hash should be 64 characters long");
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()), "Hash should contain only hex digits");
        assert!(hash.chars().all(|c| !c.is_uppercase()), "Hash should be lowercase");
    }

    #[test]
    fn test_empty_content_hash() {
        assert_eq!(
            content_sha256(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_file_hash_matches_content_hash() {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(b"int main() { return 0; }\n").unwrap();

        let from_file = file_sha256(tmp.path()).unwrap().unwrap();
        assert_eq!(from_file, content_sha256(b"int main() { return 0; }\n"));

        // Stable across calls.
        assert_eq!(file_sha256(tmp.path()).unwrap().unwrap(), from_file);
    }

    #[test]
    fn test_missing_file_is_none() {
        let result = file_sha256(Path::new("nonexistent_file.txt"));
        assert!(result.is_ok(), "Should handle non-existent file gracefully");
        assert!(result.unwrap().is_none(), "Should return None for non-existent file");
    }
}
