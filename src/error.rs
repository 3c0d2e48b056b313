//! Error types for the tarnet-doc2pdf library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Doc2PdfError`]: **Fatal**: the conversion cannot proceed or has run
//!   out of options (missing input, no backend linked or installed, every
//!   backend failed). Returned as `Err(Doc2PdfError)` from the top-level
//!   `convert*` functions.
//!
//! * [`BackendError`]: **Non-fatal**: one backend failed (renderer error,
//!   pandoc exited non-zero) but the next backend in the fallback sequence
//!   may still succeed. Stored inside [`crate::output::BackendAttempt`] so
//!   the caller sees exactly why each backend was passed over.

use crate::output::BackendAttempt;
use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the tarnet-doc2pdf library.
#[derive(Debug, Error)]
pub enum Doc2PdfError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input markdown file was not found at the given path.
    #[error("Markdown file not found: '{path}'\nCurrent directory: {cwd}")]
    InputNotFound { path: PathBuf, cwd: String },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file was read but is not valid UTF-8.
    #[error("'{path}' is not valid UTF-8 text: {detail}")]
    InvalidEncoding { path: PathBuf, detail: String },

    // ── Backend errors ────────────────────────────────────────────────────
    /// None of the configured backends is usable in this build/environment.
    #[error("No PDF backend is available: {}", summarise_missing(.missing))]
    NoBackendAvailable { missing: Vec<MissingBackend> },

    /// Every backend was tried and none produced a PDF.
    #[error("All {} PDF backends failed: {}", .attempts.len(), summarise_attempts(.attempts))]
    AllBackendsFailed { attempts: Vec<BackendAttempt> },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A backend that failed the availability check, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MissingBackend {
    pub name: String,
    pub reason: String,
}

fn summarise_missing(missing: &[MissingBackend]) -> String {
    missing
        .iter()
        .map(|m| format!("{} ({})", m.name, m.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

fn summarise_attempts(attempts: &[BackendAttempt]) -> String {
    attempts
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A non-fatal error from a single backend.
///
/// The orchestrator records it and moves on to the next backend.
#[derive(Debug, Clone, Error, serde::Serialize)]
pub enum BackendError {
    /// Backend not linked into this build, or its runtime tool is missing.
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// The renderer rejected the document.
    #[error("rendering failed: {0}")]
    Render(String),

    /// The external tool could not be started.
    #[error("could not start '{program}': {detail}")]
    Spawn { program: String, detail: String },

    /// The external tool ran but exited unsuccessfully.
    #[error("'{program}' exited with {status}: {stderr}")]
    ToolFailed {
        program: String,
        status: String,
        stderr: String,
    },

    /// The backend panicked; the panic was contained.
    #[error("backend panicked: {0}")]
    Panicked(String),

    /// The backend reported success but produced no bytes.
    #[error("backend produced an empty PDF")]
    EmptyOutput,

    /// The PDF could not be written to its destination.
    #[error("failed to write '{path}': {detail}")]
    OutputWrite { path: PathBuf, detail: String },
}
