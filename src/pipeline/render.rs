//! PDF rasterization: render every page to a PNG via Poppler's `pdftoppm`.
//!
//! ## Why an external binary?
//!
//! Rasterization is delegated to the Poppler CLI rather than an in-process
//! renderer so the tool location can be overridden at runtime (portable
//! installs, pinned versions) and a rendering crash can never take the
//! process down. `pdftoppm` is invoked once for the whole document — it
//! blocks until every page is rendered, then the pages are picked up from a
//! temp directory in page order.
//!
//! The temp directory lives inside [`RenderedDocument`]; page images are
//! loaded one at a time by the orchestrator and dropped after recognition,
//! so peak memory is one page regardless of document size.

use crate::config::ConversionConfig;
use crate::error::Pdf2WordError;
use crate::output::DocumentMetadata;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, info};

const PDFTOPPM_HINT: &str =
    "Install poppler-utils (provides pdftoppm) or pass an explicit binary path.";
const PDFINFO_HINT: &str =
    "Install poppler-utils (provides pdfinfo) or skip metadata inspection.";

/// The rasterized document: an ordered list of page PNGs in a temp dir.
///
/// The `TempDir` is kept alive until the struct is dropped, including on
/// panic, so the page files outlive the whole OCR loop.
pub struct RenderedDocument {
    pages: Vec<PathBuf>,
    _temp_dir: TempDir,
}

impl RenderedDocument {
    /// Number of rendered pages (equals the document's page count).
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Path to one rendered page file. `index` is 0-based.
    pub fn page_path(&self, index: usize) -> Result<&Path, Pdf2WordError> {
        self.pages
            .get(index)
            .map(PathBuf::as_path)
            .ok_or_else(|| {
                Pdf2WordError::Internal(format!(
                    "page index {} out of range ({} pages)",
                    index,
                    self.pages.len()
                ))
            })
    }
}

/// Load one rendered page bitmap from disk.
///
/// PNG decode of a 400-DPI page is CPU-heavy; callers run this on a blocking
/// thread. Pages are loaded one at a time so only the page currently being
/// recognized is held in memory.
pub fn load_page(path: &Path) -> Result<DynamicImage, Pdf2WordError> {
    image::open(path).map_err(|e| Pdf2WordError::RasterisationFailed {
        path: path.to_path_buf(),
        detail: format!("failed to load rendered page: {e}"),
    })
}

/// Rasterize the whole PDF at `dpi` into a fresh temp directory.
///
/// One blocking `pdftoppm` run for the entire document; there is no
/// incremental yielding of pages as they render. DPI affects image fidelity
/// only — page count and order always match the source document.
pub async fn render_document(
    pdf_path: &Path,
    config: &ConversionConfig,
) -> Result<RenderedDocument, Pdf2WordError> {
    let temp_dir = TempDir::with_prefix("pdf2word-pages")
        .map_err(|e| Pdf2WordError::Internal(format!("tempdir: {e}")))?;
    let prefix = temp_dir.path().join("page");

    let binary = config
        .pdftoppm_path
        .as_deref()
        .unwrap_or_else(|| Path::new("pdftoppm"));
    debug!(
        "Rasterising {} at {} DPI via {}",
        pdf_path.display(),
        config.dpi,
        binary.display()
    );

    let output = Command::new(binary)
        .arg("-png")
        .arg("-r")
        .arg(config.dpi.to_string())
        .arg(pdf_path)
        .arg(&prefix)
        .output()
        .await
        .map_err(|e| tool_launch_error("pdftoppm", PDFTOPPM_HINT, e))?;

    if !output.status.success() {
        return Err(Pdf2WordError::RasterisationFailed {
            path: pdf_path.to_path_buf(),
            detail: format!(
                "pdftoppm exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    let pages = collect_page_files(temp_dir.path())?;
    if pages.is_empty() {
        return Err(Pdf2WordError::RasterisationFailed {
            path: pdf_path.to_path_buf(),
            detail: "pdftoppm produced no page images".to_string(),
        });
    }

    info!("Rasterised {} pages", pages.len());
    Ok(RenderedDocument {
        pages,
        _temp_dir: temp_dir,
    })
}

/// Map a `Command` spawn error; `NotFound` gets the actionable variant.
pub(crate) fn tool_launch_error(
    tool: &'static str,
    hint: &'static str,
    err: std::io::Error,
) -> Pdf2WordError {
    if err.kind() == std::io::ErrorKind::NotFound {
        Pdf2WordError::ToolNotFound {
            tool,
            detail: err.to_string(),
            hint,
        }
    } else {
        Pdf2WordError::Internal(format!("failed to run {tool}: {err}"))
    }
}

/// Collect `page-N.png` files and order them by page number.
///
/// pdftoppm zero-pads the page number to the width of the last page
/// (`page-01.png` … `page-12.png`), so lexicographic order is already page
/// order within one run, but we parse the number anyway rather than rely on
/// the padding.
fn collect_page_files(dir: &Path) -> Result<Vec<PathBuf>, Pdf2WordError> {
    let mut numbered: Vec<(usize, PathBuf)> = Vec::new();

    let entries =
        std::fs::read_dir(dir).map_err(|e| Pdf2WordError::Internal(format!("read_dir: {e}")))?;
    for entry in entries {
        let entry = entry.map_err(|e| Pdf2WordError::Internal(format!("read_dir entry: {e}")))?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(num) = name
            .strip_prefix("page-")
            .and_then(|rest| rest.strip_suffix(".png"))
            .and_then(|digits| digits.parse::<usize>().ok())
        else {
            continue;
        };
        numbered.push((num, path));
    }

    numbered.sort_by_key(|(num, _)| *num);
    Ok(numbered.into_iter().map(|(_, path)| path).collect())
}

/// Extract document metadata via `pdfinfo` without rendering any pages.
pub async fn extract_metadata(pdf_path: &Path) -> Result<DocumentMetadata, Pdf2WordError> {
    let output = Command::new("pdfinfo")
        .arg(pdf_path)
        .output()
        .await
        .map_err(|e| tool_launch_error("pdfinfo", PDFINFO_HINT, e))?;

    if !output.status.success() {
        return Err(Pdf2WordError::MetadataFailed {
            path: pdf_path.to_path_buf(),
            detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    parse_pdfinfo(pdf_path, &stdout)
}

/// Parse `pdfinfo` key/value output into [`DocumentMetadata`].
fn parse_pdfinfo(pdf_path: &Path, stdout: &str) -> Result<DocumentMetadata, Pdf2WordError> {
    let mut meta = DocumentMetadata::default();
    let mut saw_pages = false;

    for line in stdout.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.trim() {
            "Title" => meta.title = Some(value.to_string()),
            "Author" => meta.author = Some(value.to_string()),
            "Subject" => meta.subject = Some(value.to_string()),
            "Creator" => meta.creator = Some(value.to_string()),
            "Producer" => meta.producer = Some(value.to_string()),
            "Pages" => {
                meta.page_count = value.parse().map_err(|_| Pdf2WordError::MetadataFailed {
                    path: pdf_path.to_path_buf(),
                    detail: format!("unparseable page count {value:?}"),
                })?;
                saw_pages = true;
            }
            "PDF version" => meta.pdf_version = value.to_string(),
            "Encrypted" => meta.is_encrypted = value.starts_with("yes"),
            _ => {}
        }
    }

    if !saw_pages {
        return Err(Pdf2WordError::MetadataFailed {
            path: pdf_path.to_path_buf(),
            detail: "pdfinfo output did not contain a page count".to_string(),
        });
    }
    Ok(meta)
}
