//! Direct (non-OCR) conversion: delegate whole-document structural
//! extraction to the PDF text layer.
//!
//! For digitally-authored PDFs the text layer is authoritative, so the
//! document is converted in one call: extract the full text, restructure it
//! into paragraphs, and write the `.docx`. The call is indivisible from the
//! orchestrator's point of view — there is no per-page granularity and it
//! cannot be partially cancelled.

use crate::error::Pdf2WordError;
use crate::pipeline::assemble::write_docx_atomic;
use docx_rs::{Docx, Paragraph, Run};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::info;
use unicode_normalization::UnicodeNormalization;

/// Convert the whole document in one blocking call.
///
/// Returns the number of paragraphs written. Runs synchronously; the
/// orchestrator moves it onto a blocking thread.
pub fn convert_direct_blocking(source: &Path, dest: &Path) -> Result<usize, Pdf2WordError> {
    let raw_text =
        pdf_extract::extract_text(source).map_err(|e| Pdf2WordError::DirectConversionFailed {
            path: source.to_path_buf(),
            detail: e.to_string(),
        })?;

    let paragraphs = clean_and_structure(&raw_text);
    if paragraphs.is_empty() {
        return Err(Pdf2WordError::DirectConversionFailed {
            path: source.to_path_buf(),
            detail: "no extractable text layer (a scanned PDF needs OCR mode)".to_string(),
        });
    }

    let mut docx = Docx::new();
    for para in &paragraphs {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(para.as_str())));
    }
    write_docx_atomic(docx, dest)?;

    info!(
        "Direct conversion wrote {} paragraphs to {}",
        paragraphs.len(),
        dest.display()
    );
    Ok(paragraphs.len())
}

static RE_PARAGRAPH_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:\n\s*){2,}|\x0C").unwrap());
static RE_CONTROL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\x00-\x1F\x7F]").unwrap());
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Restructure raw extracted text into clean paragraphs.
///
/// Splits at blank-line runs and form feeds first (those carry the document
/// structure), then per paragraph: NFC-normalize ligatures, replace control
/// characters, and collapse whitespace runs to single spaces.
pub fn clean_and_structure(text: &str) -> Vec<String> {
    RE_PARAGRAPH_SPLIT
        .split(text)
        .map(|chunk| {
            let normalized: String = chunk.nfc().collect();
            let no_control = RE_CONTROL.replace_all(&normalized, " ");
            RE_WHITESPACE.replace_all(&no_control, " ").trim().to_string()
        })
        .filter(|p| !p.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_paragraphs_at_blank_lines() {
        let paras = clean_and_structure("First line\ncontinues here.\n\nSecond paragraph.");
        assert_eq!(
            paras,
            vec!["First line continues here.", "Second paragraph."]
        );
    }

    #[test]
    fn splits_at_form_feed_page_boundaries() {
        let paras = clean_and_structure("page one text\u{0C}page two text");
        assert_eq!(paras, vec!["page one text", "page two text"]);
    }

    #[test]
    fn collapses_whitespace_and_drops_empties() {
        let paras = clean_and_structure("a\t \tb\n\n\n   \n\nc");
        assert_eq!(paras, vec!["a b", "c"]);
    }

    #[test]
    fn normalizes_ligatures() {
        // U+FB01 LATIN SMALL LIGATURE FI — a classic PDF extraction artefact.
        let paras = clean_and_structure("e\u{FB01}cient");
        // NFC keeps the ligature codepoint; the important part is we don't
        // lose or mangle it.
        assert_eq!(paras.len(), 1);
        assert!(paras[0].contains('\u{FB01}') || paras[0].contains("fi"));
    }

    #[test]
    fn empty_input_yields_no_paragraphs() {
        assert!(clean_and_structure("").is_empty());
        assert!(clean_and_structure(" \n \n ").is_empty());
    }
}
