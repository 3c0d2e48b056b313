//! Configuration types for Markdown-to-PDF conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. The defaults reproduce the fixed
//! conversion exactly: [`INPUT_FILE`] in, [`OUTPUT_FILE`] out, `html` first,
//! `pandoc` second, pandoc options as in [`PandocOptions::default`].
//!
//! The stylesheet is deliberately absent from this module; it lives in
//! [`crate::pipeline::template`] and is not configurable.

use crate::error::Doc2PdfError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Markdown source, relative to the working directory.
pub const INPUT_FILE: &str = "TARNET_Project_Documentation.md";

/// PDF destination, relative to the working directory.
pub const OUTPUT_FILE: &str = "TARNET_Project_Documentation.pdf";

/// Configuration for a conversion run.
///
/// # Example
/// ```rust
/// use tarnet_doc2pdf::{BackendKind, ConversionConfig};
///
/// let config = ConversionConfig::builder()
///     .backends([BackendKind::Pandoc])
///     .build()
///     .unwrap();
/// assert_eq!(config.backends, vec![BackendKind::Pandoc]);
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Markdown source. Default: [`INPUT_FILE`].
    pub input: PathBuf,

    /// PDF destination, overwritten on success. Default: [`OUTPUT_FILE`].
    pub output: PathBuf,

    /// Fallback sequence, tried front to back. Default: `[Html, Pandoc]`.
    pub backends: Vec<BackendKind>,

    /// Options passed to the pandoc backend.
    pub pandoc: PandocOptions,

    /// Optional progress observer.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(INPUT_FILE),
            output: PathBuf::from(OUTPUT_FILE),
            backends: BackendKind::ALL.to_vec(),
            pandoc: PandocOptions::default(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("input", &self.input)
            .field("output", &self.output)
            .field("backends", &self.backends)
            .field("pandoc", &self.pandoc)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn input(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.input = path.into();
        self
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output = path.into();
        self
    }

    /// Replace the fallback sequence. Duplicates are dropped, first one wins.
    pub fn backends(mut self, kinds: impl IntoIterator<Item = BackendKind>) -> Self {
        let mut seq: Vec<BackendKind> = Vec::new();
        for k in kinds {
            if !seq.contains(&k) {
                seq.push(k);
            }
        }
        self.config.backends = seq;
        self
    }

    pub fn pandoc_options(mut self, opts: PandocOptions) -> Self {
        self.config.pandoc = opts;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Doc2PdfError> {
        let c = &self.config;
        if c.backends.is_empty() {
            return Err(Doc2PdfError::InvalidConfig(
                "at least one backend must be selected".into(),
            ));
        }
        if c.input == c.output {
            return Err(Doc2PdfError::InvalidConfig(format!(
                "input and output are the same file: {}",
                c.input.display()
            )));
        }
        if c.output.as_os_str().is_empty() {
            return Err(Doc2PdfError::InvalidConfig("output path is empty".into()));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// The rendering backends, in default fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Markdown → styled HTML → PDF, rendered in-process by printpdf.
    Html,
    /// The pandoc executable with a LaTeX PDF engine.
    Pandoc,
}

impl BackendKind {
    /// Every backend, in default fallback order.
    pub const ALL: [BackendKind; 2] = [BackendKind::Html, BackendKind::Pandoc];

    /// Short name used in logs, reports and remediation text.
    pub fn name(self) -> &'static str {
        match self {
            BackendKind::Html => "html",
            BackendKind::Pandoc => "pandoc",
        }
    }

    /// Cargo feature that links this backend.
    pub fn feature(self) -> &'static str {
        self.name()
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Options for the pandoc backend.
///
/// Defaults: `xelatex`, Georgia, 11pt, 2cm margins, table of contents,
/// `tango` highlighting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PandocOptions {
    /// `--pdf-engine`
    pub pdf_engine: String,
    /// `--variable=mainfont:`
    pub main_font: String,
    /// `--variable=fontsize:`
    pub font_size: String,
    /// `--variable=geometry:margin=`
    pub margin: String,
    /// Emit `--toc`.
    pub table_of_contents: bool,
    /// `--highlight-style`
    pub highlight_style: String,
}

impl Default for PandocOptions {
    fn default() -> Self {
        Self {
            pdf_engine: "xelatex".into(),
            main_font: "Georgia".into(),
            font_size: "11pt".into(),
            margin: "2cm".into(),
            table_of_contents: true,
            highlight_style: "tango".into(),
        }
    }
}

impl PandocOptions {
    /// Command-line arguments for these options, in a stable order.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            format!("--pdf-engine={}", self.pdf_engine),
            format!("--variable=mainfont:{}", self.main_font),
            format!("--variable=fontsize:{}", self.font_size),
            format!("--variable=geometry:margin={}", self.margin),
        ];
        if self.table_of_contents {
            args.push("--toc".into());
        }
        args.push(format!("--highlight-style={}", self.highlight_style));
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_fixed_files() {
        let c = ConversionConfig::default();
        assert_eq!(c.input, PathBuf::from(INPUT_FILE));
        assert_eq!(c.output, PathBuf::from(OUTPUT_FILE));
        assert_eq!(c.backends, vec![BackendKind::Html, BackendKind::Pandoc]);
    }

    #[test]
    fn default_pandoc_args() {
        assert_eq!(
            PandocOptions::default().to_args(),
            vec![
                "--pdf-engine=xelatex",
                "--variable=mainfont:Georgia",
                "--variable=fontsize:11pt",
                "--variable=geometry:margin=2cm",
                "--toc",
                "--highlight-style=tango",
            ]
        );
    }

    #[test]
    fn toc_can_be_disabled() {
        let opts = PandocOptions {
            table_of_contents: false,
            ..PandocOptions::default()
        };
        assert!(!opts.to_args().iter().any(|a| a == "--toc"));
    }

    #[test]
    fn backends_are_deduplicated_in_order() {
        let c = ConversionConfig::builder()
            .backends([BackendKind::Pandoc, BackendKind::Html, BackendKind::Pandoc])
            .build()
            .unwrap();
        assert_eq!(c.backends, vec![BackendKind::Pandoc, BackendKind::Html]);
    }

    #[test]
    fn empty_backend_list_rejected() {
        let err = ConversionConfig::builder()
            .backends(Vec::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, Doc2PdfError::InvalidConfig(_)));
    }

    #[test]
    fn same_input_and_output_rejected() {
        let err = ConversionConfig::builder()
            .input("doc.md")
            .output("doc.md")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("same file"), "got: {err}");
    }

    #[test]
    fn backend_kind_serde_is_lowercase() {
        let json = serde_json::to_string(&BackendKind::Pandoc).unwrap();
        assert_eq!(json, "\"pandoc\"");
    }
}
