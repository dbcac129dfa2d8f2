//! Conversion entry points and the pipeline orchestrator.
//!
//! [`convert`] sequences the stages for one run: validate the source, then
//! either delegate whole-document conversion (direct mode) or drive the
//! per-page OCR loop (rasterize → preprocess → recognize → assemble) with a
//! cancellation poll at every page boundary. Pages are processed strictly
//! sequentially and appended in page order; the destination file is written
//! exactly once, on the success path only.

use crate::config::{ConversionConfig, ConversionMode};
use crate::error::Pdf2WordError;
use crate::output::{ConversionOutput, ConversionStats, DocumentMetadata};
use crate::pipeline::{assemble, direct, input, ocr, postprocess, preprocess, render};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Convert a PDF file to a Word document at `dest`.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `source` — path to an existing, readable PDF
/// * `dest`   — destination `.docx` path (parent directory must exist)
/// * `config` — conversion configuration, including mode and cancel token
///
/// # Returns
/// `Ok(ConversionOutput)` only if the destination document was fully
/// written.
///
/// # Errors
/// Typed errors for every failure mode — missing input, external tool
/// failures, unwritable destination — plus [`Pdf2WordError::Cancelled`] when
/// the run's token was observed at a page boundary. A cancelled OCR run
/// never writes output. In direct mode the single delegated call cannot be
/// interrupted; cancellation observed after it completes is reported as
/// `Cancelled` but leaves the already-written file in place.
pub async fn convert(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Pdf2WordError> {
    let total_start = Instant::now();
    let source = source.as_ref();
    let dest = dest.as_ref();
    info!("Starting conversion: {} -> {}", source.display(), dest.display());

    if let Some(ref cb) = config.progress_callback {
        cb.on_stage("Starting PDF to Word conversion...");
    }

    // ── Step 1: Validate input ───────────────────────────────────────────
    let pdf_path = input::resolve_source(source)?;

    // ── Step 2: Dispatch on mode ─────────────────────────────────────────
    match config.mode {
        ConversionMode::Direct => convert_direct(&pdf_path, dest, config, total_start).await,
        ConversionMode::Ocr => convert_ocr(&pdf_path, dest, config, total_start).await,
    }
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Pdf2WordError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Pdf2WordError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(convert(source, dest, config))
}

/// Extract PDF metadata without converting content.
///
/// Does not require the OCR or rasterizer tools, only `pdfinfo`.
pub async fn inspect(source: impl AsRef<Path>) -> Result<DocumentMetadata, Pdf2WordError> {
    let pdf_path = input::resolve_source(source.as_ref())?;
    render::extract_metadata(&pdf_path).await
}

// ── Direct mode ──────────────────────────────────────────────────────────

/// One indivisible delegated call for the whole document.
async fn convert_direct(
    pdf_path: &Path,
    dest: &Path,
    config: &ConversionConfig,
    total_start: Instant,
) -> Result<ConversionOutput, Pdf2WordError> {
    if let Some(ref cb) = config.progress_callback {
        cb.on_stage("Using direct structural conversion...");
    }

    let src = pdf_path.to_path_buf();
    let dst = dest.to_path_buf();
    let paragraphs = tokio::task::spawn_blocking(move || {
        direct::convert_direct_blocking(&src, &dst)
    })
    .await
    .map_err(|e| Pdf2WordError::Internal(format!("direct conversion task panicked: {e}")))??;

    // The delegated call has no cancellation granularity; a request that
    // arrives while it runs is only observed here, after the output file
    // already exists. Too late to prevent the write, early enough to report.
    if config.cancel.is_cancelled() {
        warn!("Cancellation observed after direct conversion; output file kept");
        if let Some(ref cb) = config.progress_callback {
            cb.on_stage("Conversion was cancelled after completion. The file was saved.");
            cb.on_cancelled(0);
        }
        return Err(Pdf2WordError::Cancelled { completed_pages: 0 });
    }

    let stats = ConversionStats {
        total_duration_ms: total_start.elapsed().as_millis() as u64,
        ..ConversionStats::default()
    };
    info!(
        "Direct conversion complete: {} paragraphs, {}ms",
        paragraphs, stats.total_duration_ms
    );
    if let Some(ref cb) = config.progress_callback {
        cb.on_stage(&format!(
            "Conversion completed successfully. Output saved to: {}",
            dest.display()
        ));
    }

    Ok(ConversionOutput {
        output_path: dest.to_path_buf(),
        pages: Vec::new(),
        stats,
    })
}

// ── OCR mode ─────────────────────────────────────────────────────────────

/// Per-page pipeline with a cancellation poll at every page boundary.
async fn convert_ocr(
    pdf_path: &Path,
    dest: &Path,
    config: &ConversionConfig,
    total_start: Instant,
) -> Result<ConversionOutput, Pdf2WordError> {
    // The token is caller-owned and scoped to this run, so a token cancelled
    // before the run started is honoured before any external tool runs.
    if config.cancel.is_cancelled() {
        return cancelled(config, 0);
    }

    // ── Step 3: Rasterize the whole document ─────────────────────────────
    let render_start = Instant::now();
    let rendered = render::render_document(pdf_path, config).await?;
    let render_duration_ms = render_start.elapsed().as_millis() as u64;
    let total_pages = rendered.page_count();
    info!("Rendered {} pages in {}ms", total_pages, render_duration_ms);

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(total_pages);
    }

    // ── Step 4: Preprocess + recognize + append, page by page ────────────
    let ocr_start = Instant::now();
    let mut assembler = assemble::DocumentAssembler::new();

    for index in 0..total_pages {
        if config.cancel.is_cancelled() {
            return cancelled(config, index);
        }

        let page_num = index + 1;
        if let Some(ref cb) = config.progress_callback {
            cb.on_page_start(page_num, total_pages);
            cb.on_stage(&format!("Processing page {page_num}/{total_pages} via OCR..."));
        }

        let text = match recognize_one_page(&rendered, index, config).await {
            Ok(text) => text,
            Err(e) => {
                if let Some(ref cb) = config.progress_callback {
                    cb.on_page_error(page_num, total_pages, &e.to_string());
                }
                return Err(e);
            }
        };

        if let Some(ref cb) = config.progress_callback {
            cb.on_page_complete(page_num, total_pages, text.chars().count());
        }
        assembler.push_page(text);
    }
    let ocr_duration_ms = ocr_start.elapsed().as_millis() as u64;

    // ── Step 5: Persist exactly once, unless cancelled meanwhile ─────────
    if config.cancel.is_cancelled() {
        if let Some(ref cb) = config.progress_callback {
            cb.on_stage("Conversion cancelled before saving.");
        }
        return cancelled(config, total_pages);
    }
    assembler.save(dest)?;

    let stats = ConversionStats {
        total_pages,
        processed_pages: assembler.page_count(),
        total_duration_ms: total_start.elapsed().as_millis() as u64,
        render_duration_ms,
        ocr_duration_ms,
    };
    info!(
        "Conversion complete: {}/{} pages, {}ms total",
        stats.processed_pages, total_pages, stats.total_duration_ms
    );
    if let Some(ref cb) = config.progress_callback {
        cb.on_stage(&format!(
            "Conversion completed. Output saved to: {}",
            dest.display()
        ));
        cb.on_conversion_complete(total_pages, stats.processed_pages);
    }

    Ok(ConversionOutput {
        output_path: dest.to_path_buf(),
        pages: assembler.page_results(),
        stats,
    })
}

/// Load, binarize, recognize, and clean a single page.
///
/// The page bitmap and its binarized form live only for this call; nothing
/// is retained after recognition. Decode and binarization are CPU-heavy at
/// 400 DPI, so they run on a blocking thread rather than the async executor.
async fn recognize_one_page(
    rendered: &render::RenderedDocument,
    index: usize,
    config: &ConversionConfig,
) -> Result<String, Pdf2WordError> {
    let page_path = rendered.page_path(index)?.to_path_buf();
    let cutoff = config.binarize_cutoff;
    let prepared = tokio::task::spawn_blocking(move || {
        let page_image = render::load_page(&page_path)?;
        Ok::<_, Pdf2WordError>(preprocess::binarize(&page_image, cutoff))
    })
    .await
    .map_err(|e| Pdf2WordError::Internal(format!("page preprocessing task panicked: {e}")))??;

    let raw = ocr::recognize_page(prepared, index + 1, config).await?;
    Ok(postprocess::clean_page_text(&raw))
}

/// Report a cancellation observed at a page boundary and build the error.
fn cancelled(
    config: &ConversionConfig,
    completed_pages: usize,
) -> Result<ConversionOutput, Pdf2WordError> {
    info!("Conversion cancelled after {} page(s)", completed_pages);
    if let Some(ref cb) = config.progress_callback {
        cb.on_stage("Conversion cancelled.");
        cb.on_cancelled(completed_pages);
    }
    Err(Pdf2WordError::Cancelled { completed_pages })
}
