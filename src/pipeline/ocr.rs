//! Text recognition: run the `tesseract` CLI on one preprocessed page.
//!
//! The recognizer is consumed as an external binary so its location and data
//! directory can be overridden at runtime. Each call writes the binarized
//! page into a scratch temp dir, runs tesseract on it, and reads the
//! produced text file back. There is no per-page retry: a recognition
//! failure aborts the whole run at the orchestrator.

use crate::config::ConversionConfig;
use crate::error::Pdf2WordError;
use crate::pipeline::render::tool_launch_error;
use image::GrayImage;
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

const TESSERACT_HINT: &str =
    "Install tesseract-ocr plus the language data (e.g. tesseract-ocr-chi-sim), \
     or pass an explicit binary path.";

/// Recognize the text on one preprocessed page image.
///
/// Takes the page by value: the PNG encode is CPU-heavy and runs on a
/// blocking thread. `page_num` is 1-indexed and used only for error
/// reporting. The returned string may be empty (a blank page is not an
/// error).
pub async fn recognize_page(
    image: GrayImage,
    page_num: usize,
    config: &ConversionConfig,
) -> Result<String, Pdf2WordError> {
    let tmpdir = tempfile::TempDir::with_prefix("pdf2word-ocr")
        .map_err(|e| Pdf2WordError::Internal(format!("tempdir: {e}")))?;
    let input_path = tmpdir.path().join("input.png");
    let output_base = tmpdir.path().join("output");
    let output_path = tmpdir.path().join("output.txt");

    let write_path = input_path.clone();
    tokio::task::spawn_blocking(move || image.save(&write_path))
        .await
        .map_err(|e| Pdf2WordError::Internal(format!("image write task panicked: {e}")))?
        .map_err(|e| Pdf2WordError::OcrFailed {
            page: page_num,
            detail: format!("failed to write input image: {e}"),
        })?;

    let binary = config
        .tesseract_path
        .as_deref()
        .unwrap_or_else(|| Path::new("tesseract"));

    let mut cmd = Command::new(binary);
    cmd.arg(&input_path)
        .arg(&output_base)
        .arg("-l")
        .arg(&config.language)
        .arg("--psm")
        .arg(config.page_seg_mode.to_string())
        .arg("--oem")
        .arg(config.engine_mode.to_string());
    if let Some(ref tessdata) = config.tessdata_dir {
        cmd.arg("--tessdata-dir").arg(tessdata);
    }

    debug!("Recognising page {} via {}", page_num, binary.display());
    let output = cmd
        .output()
        .await
        .map_err(|e| tool_launch_error("tesseract", TESSERACT_HINT, e))?;

    if !output.status.success() {
        return Err(Pdf2WordError::OcrFailed {
            page: page_num,
            detail: format!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    std::fs::read_to_string(&output_path).map_err(|e| Pdf2WordError::OcrFailed {
        page: page_num,
        detail: format!("failed to read tesseract output: {e}"),
    })
}
