//! Input validation: check the source path before handing it to external
//! tools.
//!
//! Failure to open is reported as a typed error rather than a pdftoppm or
//! tesseract stderr dump. We validate the PDF magic bytes (`%PDF`) up front
//! so callers get a meaningful error instead of a rasterizer failure on a
//! renamed JPEG.

use crate::error::Pdf2WordError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Validate that `path` exists, is readable, and starts with `%PDF`.
pub fn resolve_source(path_str: impl AsRef<Path>) -> Result<PathBuf, Pdf2WordError> {
    let path = path_str.as_ref().to_path_buf();

    if !path.exists() {
        return Err(Pdf2WordError::FileNotFound { path });
    }

    match std::fs::File::open(&path) {
        Ok(mut f) => {
            use std::io::Read;
            let mut magic = [0u8; 4];
            // A file too short to hold the magic is not a PDF either.
            if f.read_exact(&mut magic).is_err() || &magic != b"%PDF" {
                return Err(Pdf2WordError::NotAPdf { path, magic });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(Pdf2WordError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(Pdf2WordError::FileNotFound { path });
        }
    }

    debug!("Resolved source PDF: {}", path.display());
    Ok(path)
}
