//! Output assembly: accumulate per-page text into a Word document.
//!
//! Each page's text becomes one paragraph; a page-break paragraph is
//! inserted between consecutive pages but never after the final page, so an
//! N-page source yields N text paragraphs and N−1 page breaks in page order.
//! Newlines inside a page are emitted as soft line breaks within that page's
//! paragraph (a literal `\n` carries no meaning in WordprocessingML).
//!
//! The document is persisted exactly once, at the end of a successful run,
//! with a write-to-temp-then-rename so a failing run never leaves a corrupt
//! file at the destination path.

use crate::error::Pdf2WordError;
use crate::output::PageResult;
use docx_rs::{BreakType, Docx, Paragraph, Run};
use std::path::Path;
use tracing::debug;

/// Accumulates page text in page order and builds the final `.docx`.
#[derive(Debug, Default)]
pub struct DocumentAssembler {
    pages: Vec<String>,
}

impl DocumentAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one page's cleaned text. Pages must be pushed in page order.
    pub fn push_page(&mut self, text: impl Into<String>) {
        self.pages.push(text.into());
    }

    /// Number of pages appended so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Per-page results for the conversion output.
    pub fn page_results(&self) -> Vec<PageResult> {
        self.pages
            .iter()
            .enumerate()
            .map(|(i, text)| PageResult {
                page_num: i + 1,
                text: text.clone(),
            })
            .collect()
    }

    /// Build the in-memory document: one paragraph per page, a page-break
    /// paragraph between consecutive pages, none after the last.
    pub fn into_docx(&self) -> Docx {
        let mut docx = Docx::new();
        for (i, text) in self.pages.iter().enumerate() {
            if i > 0 {
                docx = docx.add_paragraph(
                    Paragraph::new().add_run(Run::new().add_break(BreakType::Page)),
                );
            }
            docx = docx.add_paragraph(page_paragraph(text));
        }
        docx
    }

    /// Persist the document to `dest` atomically (temp file + rename).
    pub fn save(&self, dest: &Path) -> Result<(), Pdf2WordError> {
        write_docx_atomic(self.into_docx(), dest)?;
        debug!("Wrote {} page(s) to {}", self.pages.len(), dest.display());
        Ok(())
    }
}

/// Write a built document to `dest` via a same-directory temp file and
/// rename, so the destination path never holds a partially written archive.
pub(crate) fn write_docx_atomic(docx: Docx, dest: &Path) -> Result<(), Pdf2WordError> {
    let tmp_path = dest.with_extension("docx.tmp");
    let write_err = |detail: String| Pdf2WordError::OutputWriteFailed {
        path: dest.to_path_buf(),
        detail,
    };

    let file = std::fs::File::create(&tmp_path).map_err(|e| write_err(e.to_string()))?;
    docx.build().pack(file).map_err(|e| write_err(e.to_string()))?;
    std::fs::rename(&tmp_path, dest).map_err(|e| write_err(e.to_string()))?;
    Ok(())
}

/// One page as a single paragraph, newlines rendered as soft line breaks.
fn page_paragraph(text: &str) -> Paragraph {
    let mut run = Run::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        if !line.is_empty() {
            run = run.add_text(line);
        }
    }
    Paragraph::new().add_run(run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{DocumentChild, ParagraphChild, RunChild};

    /// Count (text paragraphs, page-break paragraphs) in a built document.
    ///
    /// The assembler emits breaks in exactly two shapes: a page-break
    /// paragraph holds a lone break and no text, while soft line breaks
    /// always sit alongside text in their page's paragraph. Classifying on
    /// that shape avoids poking at break internals.
    fn count_children(docx: &Docx) -> (usize, usize) {
        let mut text_paragraphs = 0;
        let mut page_breaks = 0;
        for child in &docx.document.children {
            let DocumentChild::Paragraph(p) = child else {
                continue;
            };
            let mut has_break = false;
            let mut has_text = false;
            for pc in &p.children {
                let ParagraphChild::Run(run) = pc else {
                    continue;
                };
                for rc in &run.children {
                    match rc {
                        RunChild::Break(_) => has_break = true,
                        RunChild::Text(_) => has_text = true,
                        _ => {}
                    }
                }
            }
            if has_break && !has_text {
                page_breaks += 1;
            } else {
                text_paragraphs += 1;
            }
        }
        (text_paragraphs, page_breaks)
    }

    #[test]
    fn three_pages_two_breaks_in_order() {
        let mut asm = DocumentAssembler::new();
        asm.push_page("第一页");
        asm.push_page("第二页");
        asm.push_page("第三页");

        let (paragraphs, breaks) = count_children(&asm.into_docx());
        assert_eq!(paragraphs, 3);
        assert_eq!(breaks, 2);

        let results = asm.page_results();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].page_num, 1);
        assert_eq!(results[2].text, "第三页");
    }

    #[test]
    fn soft_line_breaks_are_not_page_breaks() {
        let mut asm = DocumentAssembler::new();
        asm.push_page("第一行\n第二行");
        asm.push_page("页二");
        let (paragraphs, breaks) = count_children(&asm.into_docx());
        assert_eq!(paragraphs, 2);
        assert_eq!(breaks, 1);
    }

    #[test]
    fn single_page_has_no_break() {
        let mut asm = DocumentAssembler::new();
        asm.push_page("only page");
        let (paragraphs, breaks) = count_children(&asm.into_docx());
        assert_eq!(paragraphs, 1);
        assert_eq!(breaks, 0);
    }

    #[test]
    fn empty_assembler_builds_empty_document() {
        let asm = DocumentAssembler::new();
        let (paragraphs, breaks) = count_children(&asm.into_docx());
        assert_eq!(paragraphs, 0);
        assert_eq!(breaks, 0);
    }

    #[test]
    fn save_writes_destination_and_cleans_temp() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.docx");

        let mut asm = DocumentAssembler::new();
        asm.push_page("页一\n第二行");
        asm.push_page("页二");
        asm.save(&dest).unwrap();

        assert!(dest.exists());
        assert!(!dir.path().join("out.docx.tmp").exists());
        // A .docx is a zip archive; check the magic.
        let bytes = std::fs::read(&dest).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn save_to_unwritable_path_is_write_error() {
        let asm = DocumentAssembler::new();
        let err = asm
            .save(Path::new("/nonexistent-dir/out.docx"))
            .unwrap_err();
        assert!(matches!(err, Pdf2WordError::OutputWriteFailed { .. }));
    }
}
