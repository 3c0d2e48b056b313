//! # tarnet-doc2pdf
//!
//! Convert the TARNET project documentation from Markdown to a styled PDF.
//!
//! ## Why two backends?
//!
//! Neither renderer is guaranteed to work everywhere. The built-in `html`
//! backend needs nothing outside the binary but its layout engine handles a
//! subset of CSS; the `pandoc` backend produces the best typography but needs
//! pandoc and a LaTeX engine installed. Trying one and then the other means
//! the documentation builds on any machine that has either.
//!
//! ## Pipeline Overview
//!
//! ```text
//! TARNET_Project_Documentation.md
//!  │
//!  ├─ 1. Input     read once as UTF-8 (fatal otherwise)
//!  ├─ 2. Check     which backends are linked and installed
//!  ├─ 3. html      normalise → markdown to HTML → stylesheet → printpdf
//!  ├─ 4. pandoc    only if html is unavailable or failed
//!  └─ 5. Output    TARNET_Project_Documentation.pdf, replaced atomically
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tarnet_doc2pdf::{convert, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = convert(&ConversionConfig::default())?;
//!     println!("{} wrote {} bytes", report.backend, report.output_bytes);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature  | Default | Description |
//! |----------|---------|-------------|
//! | `cli`    | on      | Enables the `doc2pdf` binary (clap + anyhow + tracing-subscriber + indicatif) |
//! | `html`   | on      | Links the printpdf-based primary backend |
//! | `pandoc` | on      | Links the pandoc-based secondary backend |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod backend;
pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod remediation;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use backend::{Availability, Backend};
pub use config::{
    BackendKind, ConversionConfig, ConversionConfigBuilder, PandocOptions, INPUT_FILE, OUTPUT_FILE,
};
pub use convert::{check_dependencies, convert, convert_with};
pub use error::{BackendError, Doc2PdfError, MissingBackend};
pub use output::{AttemptOutcome, BackendAttempt, ConversionReport};
pub use pipeline::input::SourceDocument;
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
