//! Orchestration: input check, availability check, ordered fallback.
//!
//! ```text
//! input readable? ──no──▶ InputNotFound / PermissionDenied / InvalidEncoding
//!      │
//! any backend ready? ──no──▶ NoBackendAvailable
//!      │
//! html ──ok──▶ report
//!  │fail/unavailable
//! pandoc ──ok──▶ report
//!  │fail/unavailable
//! AllBackendsFailed
//! ```
//!
//! Backend failures, including panics inside a renderer, stop at this layer:
//! they become [`AttemptOutcome::Failed`] entries and the next backend runs.
//! No retries happen and nothing is remembered between calls.

use crate::backend::{backends_for, Availability, Backend};
use crate::config::ConversionConfig;
use crate::error::{BackendError, Doc2PdfError, MissingBackend};
use crate::output::{AttemptOutcome, BackendAttempt, ConversionReport};
use crate::pipeline::input::{self, SourceDocument};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Convert the configured markdown file to PDF using the backends linked into
/// this build, in the configured order.
///
/// # Errors
/// - [`Doc2PdfError::InputNotFound`]: the source file does not exist; no
///   backend is checked and the output path is not touched
/// - [`Doc2PdfError::PermissionDenied`] / [`Doc2PdfError::InvalidEncoding`]:
///   the source cannot be read as UTF-8 text
/// - [`Doc2PdfError::NoBackendAvailable`]: nothing can run here
/// - [`Doc2PdfError::AllBackendsFailed`]: every backend was tried and failed
pub fn convert(config: &ConversionConfig) -> Result<ConversionReport, Doc2PdfError> {
    let backends = backends_for(config);
    convert_with(config, &backends)
}

/// Like [`convert`], with an explicit backend sequence.
///
/// `config.backends` is ignored; `backends` is tried front to back.
pub fn convert_with(
    config: &ConversionConfig,
    backends: &[Box<dyn Backend>],
) -> Result<ConversionReport, Doc2PdfError> {
    let total_start = Instant::now();
    let source = config.input.as_path();
    let output = config.output.as_path();
    info!("Starting conversion: {} → {}", source.display(), output.display());

    // ── Step 1: Input must exist and be UTF-8 ────────────────────────────
    // Read once; every backend gets the same document.
    let doc = input::read_source(source)?;
    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(source, output);
    }

    // ── Step 2: Availability ─────────────────────────────────────────────
    let checks = match check_dependencies(backends) {
        Ok(p) => p,
        Err(e) => {
            if let Some(ref cb) = config.progress_callback {
                cb.on_conversion_complete(false);
            }
            return Err(e);
        }
    };

    // ── Step 3: Fallback sequence ────────────────────────────────────────
    let mut attempts = Vec::with_capacity(backends.len());
    for (backend, availability) in backends.iter().zip(checks) {
        let name = backend.name().to_string();

        if let Availability::Missing(reason) = availability {
            debug!("Skipping {}: {}", name, reason);
            if let Some(ref cb) = config.progress_callback {
                cb.on_backend_skipped(&name, &reason);
            }
            attempts.push(BackendAttempt {
                backend: name,
                outcome: AttemptOutcome::Unavailable(reason),
                duration_ms: 0,
            });
            continue;
        }

        if let Some(ref cb) = config.progress_callback {
            cb.on_backend_start(&name);
        }
        let started = Instant::now();
        let result = run_contained(backend.as_ref(), &doc, output);
        let duration_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(bytes) => {
                info!("{} wrote {} bytes in {}ms", name, bytes, duration_ms);
                if let Some(ref cb) = config.progress_callback {
                    cb.on_backend_success(&name, bytes);
                    cb.on_conversion_complete(true);
                }
                attempts.push(BackendAttempt {
                    backend: name.clone(),
                    outcome: AttemptOutcome::Succeeded(bytes),
                    duration_ms,
                });
                return Ok(ConversionReport {
                    backend: name,
                    output: output.to_path_buf(),
                    output_bytes: bytes,
                    total_duration_ms: total_start.elapsed().as_millis() as u64,
                    attempts,
                });
            }
            Err(e) => {
                warn!("Error converting with {}: {}", name, e);
                if let Some(ref cb) = config.progress_callback {
                    cb.on_backend_failure(&name, &e.to_string());
                }
                attempts.push(BackendAttempt {
                    backend: name,
                    outcome: AttemptOutcome::Failed(e),
                    duration_ms,
                });
            }
        }
    }

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(false);
    }
    Err(Doc2PdfError::AllBackendsFailed { attempts })
}

/// Check every backend once.
///
/// Returns the results in backend order when at least one backend is
/// ready, and [`Doc2PdfError::NoBackendAvailable`] naming all of them
/// otherwise.
pub fn check_dependencies(
    backends: &[Box<dyn Backend>],
) -> Result<Vec<Availability>, Doc2PdfError> {
    let checks: Vec<Availability> = backends.iter().map(|b| b.availability()).collect();

    for (b, p) in backends.iter().zip(&checks) {
        match p {
            Availability::Ready(detail) => debug!("{}: ready ({})", b.name(), detail),
            Availability::Missing(reason) => debug!("{}: missing ({})", b.name(), reason),
        }
    }

    if checks.iter().any(Availability::is_ready) {
        return Ok(checks);
    }

    let missing = backends
        .iter()
        .zip(checks)
        .filter_map(|(b, p)| match p {
            Availability::Missing(reason) => Some(MissingBackend {
                name: b.name().to_string(),
                reason,
            }),
            Availability::Ready(_) => None,
        })
        .collect();
    Err(Doc2PdfError::NoBackendAvailable { missing })
}

/// Run one backend, turning a panic into a [`BackendError`].
fn run_contained(
    backend: &dyn Backend,
    source: &SourceDocument,
    output: &Path,
) -> Result<u64, BackendError> {
    panic::catch_unwind(AssertUnwindSafe(|| backend.convert(source, output))).unwrap_or_else(
        |payload| {
            let msg = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(BackendError::Panicked(msg))
        },
    )
}
