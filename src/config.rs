//! Configuration types for PDF-to-Word conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs across threads and to diff two runs to
//! understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! A ten-field constructor is unreadable and breaks on every new field. The
//! builder lets callers set only what they care about and rely on documented
//! defaults for the rest.

use crate::cancel::CancelToken;
use crate::error::Pdf2WordError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Which conversion path to take for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConversionMode {
    /// Rasterize every page and recognize its text with OCR. Use for
    /// scanned/image-based PDFs. (default)
    #[default]
    Ocr,
    /// Delegate whole-document structural conversion to the text-layer
    /// extractor. Use for digitally-authored PDFs with extractable text.
    Direct,
}

/// Configuration for a PDF-to-Word conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2word::{ConversionConfig, ConversionMode};
///
/// let config = ConversionConfig::builder()
///     .mode(ConversionMode::Ocr)
///     .dpi(300)
///     .language("eng")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Conversion mode. Default: [`ConversionMode::Ocr`].
    pub mode: ConversionMode,

    /// Rendering DPI used when rasterizing each PDF page. Range: 72–1200. Default: 400.
    ///
    /// 400 DPI gives tesseract enough pixel density for small CJK glyphs.
    /// Lower it to 200 for large-print documents where speed matters more
    /// than fidelity. Changing DPI never changes page count or page order,
    /// only the image quality handed to recognition.
    pub dpi: u32,

    /// OCR recognition language passed to tesseract via `-l`. Default: "chi_sim".
    ///
    /// Must name an installed traineddata file. Combine languages tesseract
    /// style ("chi_sim+eng") if the document mixes scripts.
    pub language: String,

    /// Tesseract page-segmentation mode (`--psm`). Default: 6.
    ///
    /// 6 assumes a single uniform block of text, which is the right model for
    /// full-page scans with no column layout.
    pub page_seg_mode: u32,

    /// Tesseract OCR-engine mode (`--oem`). Default: 1 (LSTM only).
    pub engine_mode: u32,

    /// Path to the `tesseract` binary. Default: resolve via `PATH`.
    pub tesseract_path: Option<PathBuf>,

    /// Path to the Poppler `pdftoppm` binary. Default: resolve via `PATH`.
    pub pdftoppm_path: Option<PathBuf>,

    /// Tesseract data directory, appended to the OCR invocation as
    /// `--tessdata-dir`. Default: tesseract's compiled-in location.
    pub tessdata_dir: Option<PathBuf>,

    /// Fixed grayscale cutoff (0–255) used by the fallback binarizer when
    /// automatic threshold selection is compiled out. Default: 150.
    pub binarize_cutoff: u8,

    /// Progress event sink. Default: none (no events delivered).
    pub progress_callback: Option<ProgressCallback>,

    /// Cancellation token for this run. Default: a fresh token nobody else
    /// holds, i.e. the run cannot be cancelled.
    ///
    /// Clone a caller-owned [`CancelToken`] in here to be able to interrupt
    /// the run at page boundaries.
    pub cancel: CancelToken,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            mode: ConversionMode::default(),
            dpi: 400,
            language: "chi_sim".to_string(),
            page_seg_mode: 6,
            engine_mode: 1,
            tesseract_path: None,
            pdftoppm_path: None,
            tessdata_dir: None,
            binarize_cutoff: 150,
            progress_callback: None,
            cancel: CancelToken::new(),
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("mode", &self.mode)
            .field("dpi", &self.dpi)
            .field("language", &self.language)
            .field("page_seg_mode", &self.page_seg_mode)
            .field("engine_mode", &self.engine_mode)
            .field("tesseract_path", &self.tesseract_path)
            .field("pdftoppm_path", &self.pdftoppm_path)
            .field("tessdata_dir", &self.tessdata_dir)
            .field("binarize_cutoff", &self.binarize_cutoff)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ConversionProgressCallback>"),
            )
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn mode(mut self, mode: ConversionMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi.clamp(72, 1200);
        self
    }

    pub fn language(mut self, lang: impl Into<String>) -> Self {
        self.config.language = lang.into();
        self
    }

    pub fn page_seg_mode(mut self, psm: u32) -> Self {
        self.config.page_seg_mode = psm;
        self
    }

    pub fn engine_mode(mut self, oem: u32) -> Self {
        self.config.engine_mode = oem;
        self
    }

    pub fn tesseract_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.tesseract_path = Some(path.into());
        self
    }

    pub fn pdftoppm_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdftoppm_path = Some(path.into());
        self
    }

    pub fn tessdata_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.tessdata_dir = Some(path.into());
        self
    }

    pub fn binarize_cutoff(mut self, cutoff: u8) -> Self {
        self.config.binarize_cutoff = cutoff;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.config.cancel = token;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Pdf2WordError> {
        let c = &self.config;
        if c.dpi < 72 || c.dpi > 1200 {
            return Err(Pdf2WordError::InvalidConfig(format!(
                "DPI must be 72–1200, got {}",
                c.dpi
            )));
        }
        if c.language.trim().is_empty() {
            return Err(Pdf2WordError::InvalidConfig(
                "OCR language must not be empty".into(),
            ));
        }
        if c.page_seg_mode > 13 {
            return Err(Pdf2WordError::InvalidConfig(format!(
                "Page-segmentation mode must be 0–13, got {}",
                c.page_seg_mode
            )));
        }
        if c.engine_mode > 3 {
            return Err(Pdf2WordError::InvalidConfig(format!(
                "OCR engine mode must be 0–3, got {}",
                c.engine_mode
            )));
        }
        Ok(self.config)
    }
}
