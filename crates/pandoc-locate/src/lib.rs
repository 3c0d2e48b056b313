//! # pandoc-locate
//!
//! Find a working [pandoc](https://pandoc.org/) executable at runtime, so
//! callers can decide up front whether a pandoc-based conversion is possible
//! instead of discovering it from a failed spawn.
//!
//! ## How it works
//!
//! On a call to [`locate_pandoc`] or [`ensure_pandoc`]:
//!
//! 1. If `PANDOC_PATH` is set and points at an existing file, that file is used.
//! 2. Otherwise every directory on `PATH` is searched for the platform
//!    executable name (`pandoc`, or `pandoc.exe` on Windows).
//! 3. The candidate is verified by running `<pandoc> --version` and the version
//!    number is parsed from the first line of its output.
//!
//! [`ensure_pandoc`] caches the first successful resolution for the lifetime of
//! the process; [`locate_pandoc`] always checks again.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pandoc_locate::{ensure_pandoc, find_executable};
//!
//! let pandoc = ensure_pandoc().expect("pandoc unavailable");
//! println!("pandoc {} at {}", pandoc.version, pandoc.path.display());
//!
//! if find_executable("xelatex").is_none() {
//!     eprintln!("no xelatex on PATH; PDF output will fail");
//! }
//! ```
//!
//! ## Environment variable overrides
//!
//! - `PANDOC_PATH`: path to a pandoc executable; skips the `PATH` search.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

use thiserror::Error;

// ── Public constants ─────────────────────────────────────────────────────────

/// Environment variable naming an explicit pandoc executable.
pub const PANDOC_PATH_ENV: &str = "PANDOC_PATH";

/// Where users are sent when pandoc cannot be found.
pub const PANDOC_INSTALL_URL: &str = "https://pandoc.org/installing.html";

// ── Error type ───────────────────────────────────────────────────────────────

/// Errors returned by pandoc-locate operations.
#[derive(Error, Debug)]
pub enum PandocLocateError {
    /// No pandoc executable on `PATH` and no usable `PANDOC_PATH`.
    #[error("pandoc executable not found on PATH (install it from {PANDOC_INSTALL_URL})")]
    NotFound,

    /// The candidate could not be executed at all.
    #[error("Failed to run '{path}': {reason}")]
    Spawn { path: PathBuf, reason: String },

    /// `--version` ran but exited unsuccessfully.
    #[error("'{path} --version' exited with {status}")]
    BadStatus { path: PathBuf, status: String },
}

/// A verified pandoc installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PandocInstall {
    /// Absolute (or `PANDOC_PATH`-supplied) location of the executable.
    pub path: PathBuf,
    /// Version string, e.g. `3.1.11`. `"unknown"` if the banner was unparseable.
    pub version: String,
}

// ── Platform helpers ─────────────────────────────────────────────────────────

/// Platform-specific executable file name for `tool`.
pub fn executable_name(tool: &str) -> String {
    if cfg!(windows) && !tool.ends_with(".exe") {
        format!("{tool}.exe")
    } else {
        tool.to_string()
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Search the directories of a `PATH`-style list for `tool`.
pub fn find_in_path(tool: &str, path_var: &OsStr) -> Option<PathBuf> {
    let name = executable_name(tool);
    std::env::split_paths(path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(&name))
        .find(|candidate| is_executable(candidate))
}

/// Search the current process `PATH` for `tool`.
pub fn find_executable(tool: &str) -> Option<PathBuf> {
    std::env::var_os("PATH").and_then(|p| find_in_path(tool, &p))
}

// ── Thread-safe singleton cache ──────────────────────────────────────────────

static RESOLVED: OnceLock<PandocInstall> = OnceLock::new();

// ── Public API ───────────────────────────────────────────────────────────────

/// Locate and verify pandoc, probing the environment on every call.
pub fn locate_pandoc() -> Result<PandocInstall, PandocLocateError> {
    let override_path = std::env::var_os(PANDOC_PATH_ENV).map(PathBuf::from);
    let path_var = std::env::var_os("PATH").unwrap_or_default();
    let path = resolve_candidate(override_path.as_deref(), &path_var)?;
    verify(&path)
}

/// Locate pandoc once per process; later calls return the cached result.
///
/// Failures are not cached, so installing pandoc mid-run is picked up on
/// the next call.
pub fn ensure_pandoc() -> Result<PandocInstall, PandocLocateError> {
    if let Some(install) = RESOLVED.get() {
        return Ok(install.clone());
    }
    let install = locate_pandoc()?;
    let _ = RESOLVED.set(install.clone());
    Ok(install)
}

/// Returns `true` if a working pandoc can be found.
pub fn is_pandoc_available() -> bool {
    ensure_pandoc().is_ok()
}

// ── Internal helpers ─────────────────────────────────────────────────────────

fn resolve_candidate(
    override_path: Option<&Path>,
    path_var: &OsStr,
) -> Result<PathBuf, PandocLocateError> {
    // 1. Environment variable override.
    if let Some(p) = override_path {
        if p.is_file() {
            return Ok(p.to_path_buf());
        }
        // Fall through: override set but missing → search PATH.
        eprintln!(
            "pandoc-locate: {} '{}' not found; searching PATH …",
            PANDOC_PATH_ENV,
            p.display()
        );
    }

    // 2. PATH search.
    find_in_path("pandoc", path_var).ok_or(PandocLocateError::NotFound)
}

fn verify(path: &Path) -> Result<PandocInstall, PandocLocateError> {
    let output = Command::new(path)
        .arg("--version")
        .output()
        .map_err(|e| PandocLocateError::Spawn {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(PandocLocateError::BadStatus {
            path: path.to_path_buf(),
            status: output.status.to_string(),
        });
    }

    let banner = String::from_utf8_lossy(&output.stdout);
    let version = parse_version(&banner).unwrap_or_else(|| "unknown".to_string());

    Ok(PandocInstall {
        path: path.to_path_buf(),
        version,
    })
}

/// Parse the version from `pandoc --version` output (`pandoc 3.1.11` or
/// `pandoc.exe 2.19.2` on the first line).
pub fn parse_version(banner: &str) -> Option<String> {
    let first = banner.lines().next()?;
    let mut words = first.split_whitespace();
    let name = words.next()?;
    if !name.starts_with("pandoc") {
        return None;
    }
    words
        .next()
        .filter(|v| v.chars().next().is_some_and(|c| c.is_ascii_digit()))
        .map(str::to_string)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
