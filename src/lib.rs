//! # pdf2word
//!
//! Convert PDF documents to editable Word (`.docx`) documents, with optional
//! OCR for scanned pages.
//!
//! ## Why this crate?
//!
//! Scanned PDFs have no text layer — copy/paste gives you nothing, and
//! structural converters produce empty documents. This crate rasterises each
//! page, binarizes it for recognition contrast, runs Tesseract on it, and
//! assembles a paginated Word document: one paragraph per page, a page break
//! between pages. For digitally-authored PDFs a direct mode skips OCR and
//! restructures the extractable text layer instead.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input       validate path and %PDF magic
//!  ├─ 2. Render      rasterise all pages via pdftoppm (one blocking call)
//!  ├─ 3. Preprocess  grayscale + binary threshold (Otsu)
//!  ├─ 4. Recognise   tesseract per page (chi_sim, --psm 6 --oem 1)
//!  ├─ 5. Clean       strip form feeds / CRLF / blank-line runs
//!  └─ 6. Assemble    one paragraph per page, page breaks between, .docx out
//! ```
//!
//! Pages are processed strictly sequentially in page order; a caller-owned
//! [`CancelToken`] is polled at every page boundary. Direct mode replaces
//! steps 2–6 with a single indivisible structural conversion.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2word::{convert, ConversionConfig, ConversionMode, CancelToken};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let token = CancelToken::new();
//!     let config = ConversionConfig::builder()
//!         .mode(ConversionMode::Ocr)
//!         .dpi(400)
//!         .cancel_token(token.clone())
//!         .build()?;
//!
//!     // token.cancel() from another task stops the run at the next page.
//!     let output = convert("scan.pdf", "scan.docx", &config).await?;
//!     println!("wrote {} pages to {}", output.stats.processed_pages,
//!         output.output_path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## External tools
//!
//! | Tool | Used for | Override |
//! |------|----------|----------|
//! | `pdftoppm` (poppler-utils) | page rasterisation | [`ConversionConfigBuilder::pdftoppm_path`] |
//! | `tesseract` | text recognition | [`ConversionConfigBuilder::tesseract_path`], [`ConversionConfigBuilder::tessdata_dir`] |
//! | `pdfinfo` (poppler-utils) | [`inspect`] metadata only | — |
//!
//! Direct mode needs none of these; it uses the built-in text-layer
//! extractor.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2word` binary (clap + anyhow + tracing-subscriber) |
//! | `otsu`  | on      | Automatic threshold selection for binarization (imageproc); without it a fixed cutoff is used |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod cancel;
pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use cancel::CancelToken;
pub use config::{ConversionConfig, ConversionConfigBuilder, ConversionMode};
pub use convert::{convert, convert_sync, inspect};
pub use error::Pdf2WordError;
pub use output::{ConversionOutput, ConversionStats, DocumentMetadata, PageResult};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
