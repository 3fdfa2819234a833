use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::digest::{content_sha256, file_sha256};
use crate::error::FileError;
use crate::template::{HarnessParams, HarnessTemplate, TemplateError};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    File(#[from] FileError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Written,
    /// The rendered harness matched the existing output byte for byte; the
    /// file was left alone so its mtime does not trigger a rebuild.
    Unchanged,
}

/// Render a harness and write it to `out_path`, skipping the write when the
/// output already holds identical content.
pub fn write_harness(
    template: &HarnessTemplate,
    params: &HarnessParams,
    out_path: &Path,
) -> Result<Outcome, GenerateError> {
    let rendered = template.render(params)?;

    if let Some(existing) = file_sha256(out_path)? {
        if existing == content_sha256(rendered.as_bytes()) {
            debug!(path = %out_path.display(), "harness unchanged, skipping write");
            return Ok(Outcome::Unchanged);
        }
    }

    fs::write(out_path, &rendered).map_err(|e| FileError::from_io(out_path, e))?;
    debug!(path = %out_path.display(), bytes = rendered.len(), "harness written");
    Ok(Outcome::Written)
}
