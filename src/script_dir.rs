use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::FileError;

/// Absolute, symlink-resolved directory containing the running tool.
///
/// The original toolkit computed this as a process-wide global at load time.
/// Here it is an explicitly constructed, immutable value that gets passed to
/// the components that resolve files relative to the installation, such as
/// [`crate::template::HarnessTemplate::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptDir {
    dir: PathBuf,
}

impl ScriptDir {
    /// Resolve from the path of the currently running executable.
    pub fn from_current_exe() -> Result<Self, FileError> {
        let exe = env::current_exe()
            .map_err(|e| FileError::from_io(Path::new("<current-exe>"), e))?;
        Self::from_invocation(&exe)
    }

    /// Resolve from an argv[0]-style invocation path: canonicalize it and
    /// take the containing directory.
    pub fn from_invocation(argv0: &Path) -> Result<Self, FileError> {
        let resolved = fs::canonicalize(argv0).map_err(|e| FileError::from_io(argv0, e))?;
        let dir = match resolved.parent() {
            Some(parent) => parent.to_path_buf(),
            // Canonical paths only lack a parent at the filesystem root.
            None => resolved.clone(),
        };
        Ok(ScriptDir { dir })
    }

    /// Wrap an already-known directory, canonicalizing it first.
    pub fn new(dir: &Path) -> Result<Self, FileError> {
        let dir = fs::canonicalize(dir).map_err(|e| FileError::from_io(dir, e))?;
        Ok(ScriptDir { dir })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// A path under the script directory.
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.dir.join(relative)
    }
}
