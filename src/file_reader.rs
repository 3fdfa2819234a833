use std::fs;
use std::path::Path;
use std::process;

use tracing::debug;

use crate::error::FileError;

/// Read a file's entire contents into a UTF-8 string.
///
/// No partial reads, no size limit. The underlying handle is scoped to the
/// call and released on every exit path. Decoding failures are reported as
/// `FileError::InvalidUtf8` rather than a bare I/O error.
pub fn read_file_as_text(path: &Path) -> Result<String, FileError> {
    let bytes = fs::read(path).map_err(|e| FileError::from_io(path, e))?;
    let content = String::from_utf8(bytes).map_err(|_| FileError::InvalidUtf8 {
        path: path.display().to_string(),
    })?;
    debug!(path = %path.display(), bytes = content.len(), "read text file");
    Ok(content)
}

/// Read a file's entire contents as raw bytes.
pub fn read_file_as_binary(path: &Path) -> Result<Vec<u8>, FileError> {
    fs::read(path).map_err(|e| FileError::from_io(path, e))
}

/// Compatibility surface for callers that treat an unreadable file as fatal.
///
/// On any failure this prints `Could not read file {path}` to stdout and
/// terminates the process with exit status 1. It never returns an error to
/// the caller; prefer [`read_file_as_text`] where recovery is possible.
pub fn read_file_or_exit(path: &Path) -> String {
    match read_file_as_text(path) {
        Ok(content) => content,
        Err(_) => {
            println!("Could not read file {}", path.display());
            process::exit(1);
        }
    }
}
