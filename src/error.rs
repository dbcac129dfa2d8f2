//! Error types for the pdf2word library.
//!
//! Every failure a conversion can hit is a [`Pdf2WordError`] variant, so
//! callers can match on the *kind* of failure (bad input, missing tool,
//! unwritable destination, deliberate cancellation) instead of string-matching
//! progress text. Cancellation is modelled as an error variant because it
//! shares the "no output was written" outcome with real failures, but
//! [`Pdf2WordError::is_cancelled`] lets callers report it distinctly.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdf2word library.
#[derive(Debug, Error)]
pub enum Pdf2WordError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── External tool errors ──────────────────────────────────────────────
    /// An external tool binary could not be found or launched.
    #[error("External tool '{tool}' could not be run: {detail}\n{hint}")]
    ToolNotFound {
        tool: &'static str,
        detail: String,
        hint: &'static str,
    },

    /// Rasterization of the source PDF failed.
    #[error("Rasterisation failed for '{path}': {detail}")]
    RasterisationFailed { path: PathBuf, detail: String },

    /// Text recognition failed on a specific page.
    ///
    /// There is no per-page retry: a recognition failure aborts the run.
    #[error("OCR failed on page {page}: {detail}")]
    OcrFailed { page: usize, detail: String },

    /// The direct (non-OCR) structural conversion failed.
    #[error("Direct conversion failed for '{path}': {detail}")]
    DirectConversionFailed { path: PathBuf, detail: String },

    /// `pdfinfo` metadata extraction failed.
    #[error("Failed to read PDF metadata for '{path}': {detail}")]
    MetadataFailed { path: PathBuf, detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the destination document.
    #[error("Failed to write output file '{path}': {detail}")]
    OutputWriteFailed { path: PathBuf, detail: String },

    // ── Cancellation ──────────────────────────────────────────────────────
    /// The run was cancelled through its [`crate::cancel::CancelToken`].
    ///
    /// `completed_pages` is how many pages finished recognition before the
    /// token was observed. No destination file is written for a cancelled
    /// OCR run; in direct mode the delegated call cannot be interrupted, so
    /// a cancellation observed after it completes leaves the already-written
    /// file in place.
    #[error("Conversion cancelled after {completed_pages} page(s); no further pages processed")]
    Cancelled { completed_pages: usize },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Pdf2WordError {
    /// True when the run ended because of a deliberate cancellation rather
    /// than a failure. Callers that only want a yes/no outcome can still
    /// report "cancelled" and "failed" differently.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Pdf2WordError::Cancelled { .. })
    }
}
