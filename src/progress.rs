//! Progress-callback trait for conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to hear about
//! each step of the fallback sequence as it happens.
//!
//! The library never prints; the `doc2pdf` binary implements this trait with a
//! terminal spinner, tests implement it with counters.
//!
//! # Example
//!
//! ```rust
//! use tarnet_doc2pdf::{ConversionProgressCallback, ConversionConfig};
//! use std::sync::Arc;
//!
//! struct Announce;
//!
//! impl ConversionProgressCallback for Announce {
//!     fn on_backend_start(&self, backend: &str) {
//!         eprintln!("trying {backend}…");
//!     }
//! }
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(Arc::new(Announce) as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::path::Path;
use std::sync::Arc;

/// Called by the orchestrator as it walks the backend list.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once, after the input file has been found.
    fn on_conversion_start(&self, input: &Path, output: &Path) {
        let _ = (input, output);
    }

    /// Called when a backend is passed over by the availability check.
    fn on_backend_skipped(&self, backend: &str, reason: &str) {
        let _ = (backend, reason);
    }

    /// Called just before a backend starts rendering.
    fn on_backend_start(&self, backend: &str) {
        let _ = backend;
    }

    /// Called when a backend has written the PDF.
    fn on_backend_success(&self, backend: &str, output_bytes: u64) {
        let _ = (backend, output_bytes);
    }

    /// Called when a backend fails; the next backend (if any) runs next.
    fn on_backend_failure(&self, backend: &str, error: &str) {
        let _ = (backend, error);
    }

    /// Called once after the fallback sequence ends.
    fn on_conversion_complete(&self, succeeded: bool) {
        let _ = succeeded;
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
