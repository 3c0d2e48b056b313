//! Rendering backends and the build-time registry.
//!
//! A backend turns a loaded [`SourceDocument`] into a PDF at an output path.
//! Each one answers two questions:
//!
//! * [`Backend::availability`]: can it run here at all? The `html` backend
//!   is ready whenever it was compiled in; the `pandoc` backend also needs a
//!   pandoc executable at runtime.
//! * [`Backend::convert`]: do the conversion, or explain why not with a
//!   [`BackendError`].
//!
//! A backend whose cargo feature was disabled is represented by
//! [`UnlinkedBackend`], which is always unavailable and says which feature to
//! enable.

use crate::config::{BackendKind, ConversionConfig};
use crate::error::BackendError;
use crate::pipeline::input::SourceDocument;
use std::path::Path;

#[cfg(feature = "html")]
pub mod html;
#[cfg(feature = "pandoc")]
pub mod pandoc;

/// Result of a backend's availability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// Usable; the string describes what was found.
    Ready(String),
    /// Not usable; the string says why.
    Missing(String),
}

impl Availability {
    pub fn is_ready(&self) -> bool {
        matches!(self, Availability::Ready(_))
    }
}

/// A Markdown → PDF renderer.
pub trait Backend {
    /// Short name used in logs, reports and remediation text.
    fn name(&self) -> &str;

    /// Check whether this backend can run in the current environment.
    fn availability(&self) -> Availability;

    /// Convert `source` into a PDF at `output`, returning the PDF size.
    ///
    /// The source has already been read and validated as UTF-8.
    /// `output` is replaced only when a complete, non-empty PDF exists.
    fn convert(&self, source: &SourceDocument, output: &Path) -> Result<u64, BackendError>;
}

/// Placeholder for a backend whose cargo feature is disabled.
#[derive(Debug, Clone, Copy)]
pub struct UnlinkedBackend {
    kind: BackendKind,
}

impl UnlinkedBackend {
    pub fn new(kind: BackendKind) -> Self {
        Self { kind }
    }

    fn reason(&self) -> String {
        format!(
            "not compiled into this build (rebuild with `--features {}`)",
            self.kind.feature()
        )
    }
}

impl Backend for UnlinkedBackend {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn availability(&self) -> Availability {
        Availability::Missing(self.reason())
    }

    fn convert(&self, _source: &SourceDocument, _output: &Path) -> Result<u64, BackendError> {
        Err(BackendError::Unavailable(self.reason()))
    }
}

/// Instantiate the backend for `kind`, or an [`UnlinkedBackend`] if its
/// feature is off.
pub fn backend_for(kind: BackendKind, config: &ConversionConfig) -> Box<dyn Backend> {
    match kind {
        #[cfg(feature = "html")]
        BackendKind::Html => Box::new(html::HtmlBackend::new()),
        #[cfg(feature = "pandoc")]
        BackendKind::Pandoc => Box::new(pandoc::PandocBackend::new(config.pandoc.clone())),
        #[allow(unreachable_patterns)]
        other => {
            let _ = config;
            Box::new(UnlinkedBackend::new(other))
        }
    }
}

/// The configured fallback sequence as backend instances.
pub fn backends_for(config: &ConversionConfig) -> Vec<Box<dyn Backend>> {
    config
        .backends
        .iter()
        .map(|&kind| backend_for(kind, config))
        .collect()
}

/// Whether `kind` was linked into this build.
pub fn is_linked(kind: BackendKind) -> bool {
    match kind {
        BackendKind::Html => cfg!(feature = "html"),
        BackendKind::Pandoc => cfg!(feature = "pandoc"),
    }
}
