//! Result types returned by a conversion.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The recognized text of a single page (OCR mode).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult {
    /// 1-indexed page number.
    pub page_num: usize,
    /// Cleaned recognized text. May be empty for a blank page.
    pub text: String,
}

/// Timing and page-count statistics for a completed conversion.
///
/// Direct mode has no page granularity; its page counts are reported as 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Pages in the rasterized document (OCR mode).
    pub total_pages: usize,
    /// Pages recognized and appended (equals `total_pages` on success).
    pub processed_pages: usize,
    /// Wall-clock duration of the whole run.
    pub total_duration_ms: u64,
    /// Time spent rasterizing the document (OCR mode).
    pub render_duration_ms: u64,
    /// Time spent in preprocessing plus recognition (OCR mode).
    pub ocr_duration_ms: u64,
}

/// A successful conversion: the written document plus per-page results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// Where the `.docx` document was written.
    pub output_path: PathBuf,
    /// Per-page recognized text (empty in direct mode).
    pub pages: Vec<PageResult>,
    /// Run statistics.
    pub stats: ConversionStats,
}

/// Document metadata reported by [`crate::convert::inspect`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub page_count: usize,
    pub pdf_version: String,
    pub is_encrypted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_json_serialisable() {
        let out = ConversionOutput {
            output_path: PathBuf::from("/tmp/out.docx"),
            pages: vec![PageResult {
                page_num: 1,
                text: "你好".to_string(),
            }],
            stats: ConversionStats {
                total_pages: 1,
                processed_pages: 1,
                total_duration_ms: 10,
                render_duration_ms: 4,
                ocr_duration_ms: 5,
            },
        };
        let json = serde_json::to_string(&out).unwrap();
        assert!(json.contains("out.docx"));
        let back: ConversionOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(back.pages.len(), 1);
        assert_eq!(back.stats.total_pages, 1);
    }
}
