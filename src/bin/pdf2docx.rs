//! CLI binary for pdf2docx.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2docx::{
    convert_dir, convert_file, BatchPolicy, ComposeMode, ConversionConfig,
    ConversionProgressCallback, Converter, ProgressCallback,
};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
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

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar per file, reset when the next file
/// of a batch starts.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICKS);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Opening PDF…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
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
        .tick_strings(TICKS);

        self.bar.set_position(0);
        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Rendering");
        self.bar.reset_eta();
        self.bar.reset_elapsed();
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_file_start(&self, file_index: usize, total_files: usize, source: &Path) {
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!(
                "[{file_index}/{total_files}] {}",
                source.display()
            ))
        ));
    }

    fn on_conversion_start(&self, _source: &Path, total_pages: usize) {
        self.activate_bar(total_pages);
    }

    fn on_page_complete(&self, page_num: usize, _total: usize) {
        self.bar.set_message(format!("page {page_num}"));
        self.bar.inc(1);
    }

    fn on_conversion_complete(&self, output: &Path, total_pages: usize) {
        self.bar.println(format!(
            "  {} {} pages  →  {}",
            green("✓"),
            total_pages,
            bold(&output.display().to_string())
        ));
    }

    fn on_file_error(&self, source: &Path, error: &str) {
        // Keep output tidy: first line of the error only.
        let msg = error.lines().next().unwrap_or(error);
        self.bar
            .println(format!("  {} {}  {}", red("✗"), source.display(), red(msg)));
    }
}

impl Drop for CliProgressCallback {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # paper.pdf → paper.docx
  pdf2docx paper.pdf

  # Explicit output path
  pdf2docx paper.pdf -o out/paper.docx

  # Every *.pdf in a directory, documents written beside each PDF
  pdf2docx papers/

  # Batch into another directory, keep going past broken files
  pdf2docx papers/ -o converted/ --continue-on-error

  # Lower resolution, separate scratch directory
  pdf2docx --dpi 150 --temp-dir /tmp/pdf2docx-pages scan.pdf

  # Inspect PDF metadata only
  pdf2docx --inspect-only paper.pdf

NOTES:
  The output document and the temp directory must not exist; pdf2docx never
  overwrites either. The temp directory is removed after each successful file
  and left in place when a conversion fails.

ENVIRONMENT VARIABLES:
  PDFIUM_LIB_PATH   Path to libpdfium (file or containing directory)
  RUST_LOG          Log filter, e.g. pdf2docx=debug
"#;

#[derive(Parser, Debug)]
#[command(
    name = "pdf2docx",
    version,
    about = "Convert PDF documents to Word by rasterising each page into a full-page picture",
    after_help = AFTER_HELP
)]
struct Cli {
    /// PDF file, or a directory of PDF files.
    input: PathBuf,

    /// Output .docx path (single file) or output directory (batch).
    /// Defaults to the input path with a .docx extension.
    #[arg(short, long, env = "PDF2DOCX_OUTPUT")]
    output: Option<PathBuf>,

    /// Scratch directory for page images; must not exist.
    #[arg(long, env = "PDF2DOCX_TEMP_DIR", default_value = "tmp")]
    temp_dir: PathBuf,

    /// Rendering DPI (at least 1).
    #[arg(long, env = "PDF2DOCX_DPI", default_value_t = 300)]
    dpi: u32,

    /// Compose while rendering, or render everything first.
    #[arg(long, env = "PDF2DOCX_MODE", value_enum, default_value = "single-pass")]
    mode: ModeArg,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDF2DOCX_PASSWORD")]
    password: Option<String>,

    /// Batch only: record failures and continue with the next file.
    #[arg(long, env = "PDF2DOCX_CONTINUE_ON_ERROR")]
    continue_on_error: bool,

    /// Print a JSON summary (stats or batch report) on stdout.
    #[arg(long, env = "PDF2DOCX_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "PDF2DOCX_NO_PROGRESS")]
    no_progress: bool,

    /// Print PDF metadata only, no conversion.
    #[arg(long)]
    inspect_only: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2DOCX_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2DOCX_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum ModeArg {
    SinglePass,
    TwoPass,
}

impl From<ModeArg> for ComposeMode {
    fn from(v: ModeArg) -> Self {
        match v {
            ModeArg::SinglePass => ComposeMode::SinglePass,
            ModeArg::TwoPass => ComposeMode::TwoPass,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO-level library logs.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json && !cli.inspect_only;
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
        let config = build_config(&cli, None)?;
        let meta = Converter::new(config)
            .inspect(&cli.input)
            .context("Failed to inspect PDF")?;

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
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb)?;

    // ── Run conversion ───────────────────────────────────────────────────
    if cli.input.is_dir() {
        let report = convert_dir(&cli.input, cli.output.as_deref(), &config)
            .context("Batch conversion failed")?;
        drop(config);

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to serialise report")?
            );
        } else if !cli.quiet {
            if report.is_empty() {
                eprintln!(
                    "{} no .pdf files in {}",
                    cyan("⚠"),
                    bold(&cli.input.display().to_string())
                );
            } else {
                eprintln!(
                    "{}  {}/{} files  {} pages",
                    if report.failed.is_empty() {
                        green("✔")
                    } else {
                        cyan("⚠")
                    },
                    report.converted.len(),
                    report.attempted(),
                    report.total_pages(),
                );
                for f in &report.failed {
                    let msg = f.error.lines().next().unwrap_or(&f.error);
                    eprintln!("   {} {}  {}", red("✗"), f.source.display(), dim(msg));
                }
            }
        }

        if !report.failed.is_empty() {
            anyhow::bail!("{} of {} files failed", report.failed.len(), report.attempted());
        }
    } else {
        let stats = convert_file(&cli.input, cli.output.as_deref(), &config)
            .context("Conversion failed")?;
        drop(config);

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&stats).context("Failed to serialise stats")?
            );
        } else if !cli.quiet {
            eprintln!(
                "{}  {} pages  {}ms  →  {}",
                green("✔"),
                stats.page_count,
                stats.total_duration_ms,
                bold(&stats.output.display().to_string()),
            );
            eprintln!(
                "   {}",
                dim(&format!(
                    "render {}ms  /  compose {}ms  @ {} dpi",
                    stats.render_duration_ms, stats.compose_duration_ms, stats.dpi
                )),
            );
        }
    }

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder()
        .dpi(cli.dpi)
        .temp_dir(&cli.temp_dir)
        .mode(cli.mode.clone().into())
        .batch_policy(if cli.continue_on_error {
            BatchPolicy::SkipAndContinue
        } else {
            BatchPolicy::Abort
        });

    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
