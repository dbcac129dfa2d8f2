//! CLI binary for pdf2word.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig`, renders progress, and wires Ctrl-C to the run's
//! cancellation token.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2word::{
    convert, inspect, CancelToken, ConversionConfig, ConversionMode, ConversionProgressCallback,
    ProgressCallback,
};
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a live progress bar plus per-page log lines.
/// Pages arrive strictly in order, so no out-of-order handling is needed.
struct CliProgressCallback {
    /// The single progress bar anchored at the bottom of the terminal.
    bar: ProgressBar,
    /// Per-page wall-clock start times for elapsed reporting.
    start_times: Mutex<HashMap<usize, Instant>>,
}

impl CliProgressCallback {
    /// Create a callback whose progress-bar length is set dynamically by
    /// `on_conversion_start` (rasterisation must finish before the page
    /// count is known).
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_conversion_start

        // Initial style: spinner only (no counter until we know the total).
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Opening PDF…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            start_times: Mutex::new(HashMap::new()),
        })
    }

    /// Switch to the full progress-bar style once we know `total`.
    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} pages  \
             ⏱ {elapsed_precise}  ETA {eta_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Converting");
        self.bar.reset_eta();
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_stage(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    fn on_conversion_start(&self, total_pages: usize) {
        self.activate_bar(total_pages);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Recognising {total_pages} pages…"))
        ));
    }

    fn on_page_start(&self, page_num: usize, _total: usize) {
        self.start_times
            .lock()
            .unwrap()
            .insert(page_num, Instant::now());
        self.bar.set_message(format!("page {page_num}"));
    }

    fn on_page_complete(&self, page_num: usize, total: usize, chars: usize) {
        let elapsed_ms = self
            .start_times
            .lock()
            .unwrap()
            .remove(&page_num)
            .map(|t| t.elapsed().as_millis())
            .unwrap_or(0);

        self.bar.println(format!(
            "  {} Page {:>3}/{:<3}  {:<8}  {}",
            green("✓"),
            page_num,
            total,
            dim(&format!("{chars:>5} chars")),
            dim(&format!("{:.1}s", elapsed_ms as f64 / 1000.0)),
        ));
        self.bar.inc(1);
    }

    fn on_page_error(&self, page_num: usize, total: usize, error: &str) {
        // Truncate very long error messages to keep output tidy.
        let msg = if error.len() > 80 {
            let cut = error
                .char_indices()
                .take_while(|(i, _)| *i < 79)
                .last()
                .map(|(i, c)| i + c.len_utf8())
                .unwrap_or(0);
            format!("{}\u{2026}", &error[..cut])
        } else {
            error.to_string()
        };

        self.bar.println(format!(
            "  {} Page {:>3}/{:<3}  {}",
            red("✗"),
            page_num,
            total,
            red(&msg),
        ));
        self.bar.inc(1);
    }

    fn on_cancelled(&self, completed_pages: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} Cancelled after {} page(s); no output written",
            cyan("⚠"),
            bold(&completed_pages.to_string())
        );
    }

    fn on_conversion_complete(&self, total_pages: usize, processed_pages: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {}/{} pages recognised",
            green("✔"),
            bold(&processed_pages.to_string()),
            total_pages
        );
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # OCR a scanned PDF (default mode, simplified Chinese)
  pdf2word scan.pdf -o scan.docx

  # OCR in English at 300 DPI
  pdf2word --lang eng --dpi 300 scan.pdf -o scan.docx

  # Direct conversion for a digitally-authored PDF (no OCR)
  pdf2word --direct report.pdf -o report.docx

  # Portable tool installs
  pdf2word --tesseract-path /opt/tesseract/bin/tesseract \
           --pdftoppm-path /opt/poppler/bin/pdftoppm \
           --tessdata-dir /opt/tesseract/share/tessdata scan.pdf

  # Inspect PDF metadata (needs pdfinfo only)
  pdf2word --inspect-only document.pdf

  # Machine-readable run statistics
  pdf2word --json scan.pdf -o scan.docx

EXTERNAL TOOLS:
  pdftoppm, pdfinfo   poppler-utils (OCR mode / --inspect-only)
  tesseract           tesseract-ocr plus language data, e.g.
                      tesseract-ocr-chi-sim for the default language

  Direct mode (--direct) needs none of these.

CANCELLATION:
  Press Ctrl-C once to request cancellation. The page currently being
  recognised finishes first; no output file is written for a cancelled
  OCR run. Direct mode cannot be interrupted mid-conversion.
"#;

/// Convert PDF files to editable Word documents, with optional OCR.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2word",
    version,
    about = "Convert PDF files to editable Word documents, with optional OCR",
    long_about = "Convert PDF documents to Word (.docx). Scanned PDFs go through a per-page \
OCR pipeline (pdftoppm + tesseract); digitally-authored PDFs can use --direct to restructure \
the extractable text layer without OCR.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Source PDF file path.
    input: PathBuf,

    /// Destination .docx path. Default: the input path with a .docx extension.
    #[arg(short, long, env = "PDF2WORD_OUTPUT")]
    output: Option<PathBuf>,

    /// Direct structural conversion (no OCR) for PDFs with a text layer.
    #[arg(long, env = "PDF2WORD_DIRECT")]
    direct: bool,

    /// Rasterisation DPI (72–1200).
    #[arg(long, env = "PDF2WORD_DPI", default_value_t = 400,
          value_parser = clap::value_parser!(u32).range(72..=1200))]
    dpi: u32,

    /// OCR language(s) passed to tesseract, e.g. chi_sim or chi_sim+eng.
    #[arg(long, env = "PDF2WORD_LANG", default_value = "chi_sim")]
    lang: String,

    /// Tesseract page-segmentation mode (--psm).
    #[arg(long, env = "PDF2WORD_PSM", default_value_t = 6,
          value_parser = clap::value_parser!(u32).range(0..=13))]
    psm: u32,

    /// Tesseract OCR-engine mode (--oem).
    #[arg(long, env = "PDF2WORD_OEM", default_value_t = 1,
          value_parser = clap::value_parser!(u32).range(0..=3))]
    oem: u32,

    /// Path to the tesseract binary (default: found via PATH).
    #[arg(long, env = "PDF2WORD_TESSERACT")]
    tesseract_path: Option<PathBuf>,

    /// Path to the poppler pdftoppm binary (default: found via PATH).
    #[arg(long, env = "PDF2WORD_PDFTOPPM")]
    pdftoppm_path: Option<PathBuf>,

    /// Tesseract data directory (--tessdata-dir).
    #[arg(long, env = "PDF2WORD_TESSDATA")]
    tessdata_dir: Option<PathBuf>,

    /// Print run statistics as JSON on stdout.
    #[arg(long, env = "PDF2WORD_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "PDF2WORD_NO_PROGRESS")]
    no_progress: bool,

    /// Print PDF metadata only, no conversion.
    #[arg(long)]
    inspect_only: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2WORD_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2WORD_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let meta = inspect(&cli.input).await.context("Failed to inspect PDF")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&meta).context("Failed to serialise metadata")?
            );
        } else {
            println!("File:         {}", cli.input.display());
            if let Some(ref t) = meta.title {
                println!("Title:        {}", t);
            }
            if let Some(ref a) = meta.author {
                println!("Author:       {}", a);
            }
            if let Some(ref s) = meta.subject {
                println!("Subject:      {}", s);
            }
            println!("Pages:        {}", meta.page_count);
            println!("PDF Version:  {}", meta.pdf_version);
            println!("Encrypted:    {}", meta.is_encrypted);
            if let Some(ref p) = meta.producer {
                println!("Producer:     {}", p);
            }
            if let Some(ref c) = meta.creator {
                println!("Creator:      {}", c);
            }
        }
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension("docx"));

    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new_dynamic() as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };

    let token = CancelToken::new();
    let config = build_config(&cli, token.clone(), progress_cb)?;

    // ── Ctrl-C → cancellation token ──────────────────────────────────────
    // First Ctrl-C requests a graceful stop at the next page boundary; a
    // second one falls through to the default handler and kills the process.
    {
        let token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("\nStopping after the current page… (Ctrl-C again to force quit)");
                token.cancel();
            }
        });
    }

    // ── Run conversion ───────────────────────────────────────────────────
    match convert(&cli.input, &output_path, &config).await {
        Ok(output) => {
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output.stats)
                        .context("Failed to serialise stats")?
                );
            } else if !cli.quiet {
                eprintln!(
                    "{}  {}ms  →  {}",
                    green("✔"),
                    output.stats.total_duration_ms,
                    bold(&output.output_path.display().to_string()),
                );
            }
            Ok(())
        }
        Err(e) if e.is_cancelled() => {
            if !cli.quiet {
                eprintln!("{} {}", cyan("⚠"), e);
            }
            std::process::exit(130);
        }
        Err(e) => Err(e).context("Conversion failed"),
    }
}

/// Map CLI args to `ConversionConfig`.
fn build_config(
    cli: &Cli,
    token: CancelToken,
    progress: Option<ProgressCallback>,
) -> Result<ConversionConfig> {
    let mode = if cli.direct {
        ConversionMode::Direct
    } else {
        ConversionMode::Ocr
    };

    let mut builder = ConversionConfig::builder()
        .mode(mode)
        .dpi(cli.dpi)
        .language(&cli.lang)
        .page_seg_mode(cli.psm)
        .engine_mode(cli.oem)
        .cancel_token(token);

    if let Some(ref path) = cli.tesseract_path {
        builder = builder.tesseract_path(path);
    }
    if let Some(ref path) = cli.pdftoppm_path {
        builder = builder.pdftoppm_path(path);
    }
    if let Some(ref path) = cli.tessdata_dir {
        builder = builder.tessdata_dir(path);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
