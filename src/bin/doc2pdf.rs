//! CLI binary for tarnet-doc2pdf.
//!
//! Converts `TARNET_Project_Documentation.md` in the working directory to
//! `TARNET_Project_Documentation.pdf`. The paths are fixed; flags only pick
//! backends and control output. Exit code is 0 on success and 1 otherwise.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, IsTerminal};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tarnet_doc2pdf::pipeline::input;
use tarnet_doc2pdf::{
    convert, remediation, AttemptOutcome, BackendKind, ConversionConfig,
    ConversionProgressCallback, ConversionReport, Doc2PdfError, ProgressCallback,
};
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

const RULE_WIDTH: usize = 70;

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal spinner plus one log line per backend.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(style);
        bar.set_prefix("Preparing");
        bar.set_message("Checking backends…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_backend_skipped(&self, backend: &str, reason: &str) {
        self.bar.println(format!(
            "  {} {:<7} {}",
            dim("–"),
            backend,
            dim(&format!("skipped: {reason}"))
        ));
    }

    fn on_backend_start(&self, backend: &str) {
        self.bar.set_prefix("Converting");
        self.bar.set_message(format!("rendering with {backend}…"));
    }

    fn on_backend_success(&self, backend: &str, bytes: u64) {
        self.bar.println(format!(
            "  {} {:<7} {}",
            green("✓"),
            backend,
            dim(&format!("{bytes} bytes"))
        ));
    }

    fn on_backend_failure(&self, backend: &str, error: &str) {
        // Keep the spinner area tidy; the full error is in the final summary.
        let first = error.lines().next().unwrap_or(error);
        let msg = if first.chars().count() > 80 {
            format!("{}\u{2026}", first.chars().take(79).collect::<String>())
        } else {
            first.to_string()
        };
        self.bar
            .println(format!("  {} {:<7} {}", red("✗"), backend, red(&msg)));
    }

    fn on_conversion_complete(&self, _success: bool) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert with the default fallback order (html, then pandoc)
  doc2pdf

  # Only use pandoc
  doc2pdf --backend pandoc

  # Try pandoc first, then the built-in renderer
  doc2pdf --backend pandoc --backend html

  # Machine-readable report
  doc2pdf --json > report.json

FILES:
  TARNET_Project_Documentation.md   read from the working directory
  TARNET_Project_Documentation.pdf  written to the working directory

ENVIRONMENT VARIABLES:
  DOC2PDF_BACKEND   Comma-separated backend order (html, pandoc)
  PANDOC_PATH       Path to a pandoc executable; skips the PATH search
  RUST_LOG          Overrides the log filter (e.g. tarnet_doc2pdf=debug)

EXIT STATUS:
  0  the PDF was written
  1  the input is missing, no backend is usable, or every backend failed
"#;

/// Convert the TARNET project documentation from Markdown to PDF.
#[derive(Parser, Debug)]
#[command(
    name = "doc2pdf",
    version,
    about = "Convert TARNET_Project_Documentation.md to a styled PDF",
    long_about = "Convert TARNET_Project_Documentation.md in the working directory to \
TARNET_Project_Documentation.pdf. The built-in HTML renderer is tried first and pandoc \
second; when neither works, manual conversion instructions are printed.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Backend order: html, pandoc. Repeat or comma-separate.
    #[arg(
        short,
        long = "backend",
        env = "DOC2PDF_BACKEND",
        value_enum,
        value_delimiter = ','
    )]
    backends: Vec<BackendArg>,

    /// Print the conversion report as JSON on stdout.
    #[arg(long, env = "DOC2PDF_JSON")]
    json: bool,

    /// Disable the spinner.
    #[arg(long, env = "DOC2PDF_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "DOC2PDF_VERBOSE")]
    verbose: bool,

    /// Suppress banners; failures are still reported.
    #[arg(short, long, env = "DOC2PDF_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum BackendArg {
    Html,
    Pandoc,
}

impl From<BackendArg> for BackendKind {
    fn from(v: BackendArg) -> Self {
        match v {
            BackendArg::Html => BackendKind::Html,
            BackendArg::Pandoc => BackendKind::Pandoc,
        }
    }
}

/// Where human-readable text goes. With `--json`, stdout is reserved for the
/// report and everything else moves to stderr.
struct Console {
    json: bool,
    quiet: bool,
}

impl Console {
    /// Informational line, dropped under `--quiet`.
    fn info(&self, line: impl AsRef<str>) {
        if !self.quiet {
            self.always(line);
        }
    }

    /// Line printed regardless of `--quiet`.
    fn always(&self, line: impl AsRef<str>) {
        if self.json {
            eprintln!("{}", line.as_ref());
        } else {
            println!("{}", line.as_ref());
        }
    }

    fn banner(&self, title: &str) {
        self.always("");
        self.always("=".repeat(RULE_WIDTH));
        self.always(bold(title));
        self.always("=".repeat(RULE_WIDTH));
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner replaces INFO-level library logs when it is active.
    let show_progress =
        !cli.quiet && !cli.no_progress && !cli.json && io::stderr().is_terminal();
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

    let console = Console {
        json: cli.json,
        quiet: cli.quiet,
    };

    console.info("=".repeat(RULE_WIDTH));
    console.info(bold("TARNET PROJECT DOCUMENTATION → PDF CONVERTER"));
    console.info("=".repeat(RULE_WIDTH));

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb)?;

    // Checked here as well so the banner lines below only appear for an
    // existing input; `convert` repeats the check.
    if let Err(e) = input::ensure_exists(&config.input) {
        report_failure(&console, &config, &e);
        return Ok(ExitCode::FAILURE);
    }

    console.info(format!("\n📄 Input:  {}", config.input.display()));
    console.info(format!("📑 Output: {}", config.output.display()));
    console.info(format!(
        "🔧 Backends: {}",
        config
            .backends
            .iter()
            .map(|b| b.name())
            .collect::<Vec<_>>()
            .join(" → ")
    ));

    // ── Run conversion ───────────────────────────────────────────────────
    match convert(&config) {
        Ok(report) => {
            if cli.json {
                let json =
                    serde_json::to_string_pretty(&report).context("Failed to serialise report")?;
                println!("{json}");
            }
            report_success(&console, &report);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            report_failure(&console, &config, &e);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Map CLI args to `ConversionConfig`. Paths always keep their defaults.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder();

    if !cli.backends.is_empty() {
        builder = builder.backends(cli.backends.iter().copied().map(BackendKind::from));
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

fn report_success(console: &Console, report: &ConversionReport) {
    for attempt in report.failed_attempts() {
        console.info(format!("{} {}", cyan("⚠"), attempt));
    }
    console.info(format!(
        "\n{} PDF generated successfully with {}  {}",
        green("✅"),
        bold(&report.backend),
        dim(&format!(
            "{} bytes, {}ms",
            report.output_bytes, report.total_duration_ms
        )),
    ));
    console.info(format!(
        "📁 PDF saved to: {}",
        absolute(&report.output).display()
    ));
}

fn report_failure(console: &Console, config: &ConversionConfig, err: &Doc2PdfError) {
    match err {
        Doc2PdfError::InputNotFound { path, cwd } => {
            console.always(format!(
                "{} Error: {} not found!",
                red("❌"),
                path.display()
            ));
            console.always(format!("Current directory: {cwd}"));
        }
        Doc2PdfError::NoBackendAvailable { missing } => {
            console.banner("MISSING DEPENDENCIES");
            console.always(remediation::missing_dependencies(missing));
        }
        Doc2PdfError::AllBackendsFailed { attempts } => {
            console.always("");
            for attempt in attempts {
                let mark = match attempt.outcome {
                    AttemptOutcome::Unavailable(_) => dim("–"),
                    _ => red("❌"),
                };
                console.always(format!("{mark} {attempt}"));
            }
            console.banner("MANUAL CONVERSION INSTRUCTIONS");
            console.always(remediation::manual_instructions(config));
        }
        other => {
            console.always(format!("{} Error: {other}", red("❌")));
        }
    }
}

/// Best-effort absolute form of `path` for display.
fn absolute(path: &Path) -> std::path::PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
