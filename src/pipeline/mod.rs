//! Pipeline stages for PDF-to-Word conversion.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. a different rasterizer binary) without
//! touching other stages.
//!
//! ## Data Flow (OCR mode)
//!
//! ```text
//! input ──▶ render ──▶ preprocess ──▶ ocr ──▶ postprocess ──▶ assemble
//! (path)  (pdftoppm)  (binarize)  (tesseract)  (cleanup)      (docx)
//! ```
//!
//! 1. [`input`]      — validate the source path and PDF magic bytes
//! 2. [`render`]     — rasterize the whole document to PNGs via `pdftoppm`;
//!    one blocking external call, pages land in a temp dir in page order
//! 3. [`preprocess`] — grayscale + binary thresholding per page
//! 4. [`ocr`]        — run `tesseract` on one preprocessed page
//! 5. [`postprocess`] — deterministic cleanup of raw OCR text
//! 6. [`assemble`]   — accumulate paragraphs/page breaks, persist `.docx`
//!
//! Direct mode bypasses all of the above and delegates to [`direct`] in a
//! single indivisible call.

pub mod assemble;
pub mod direct;
pub mod input;
pub mod ocr;
pub mod postprocess;
pub mod preprocess;
pub mod render;
