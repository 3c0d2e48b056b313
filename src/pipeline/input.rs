//! Input resolution: confirm the markdown source exists and load it.
//!
//! Existence is checked before anything else so that a missing file is
//! reported without probing backends and without touching the output path.

use crate::error::Doc2PdfError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A markdown source that has been found and read.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    path: PathBuf,
    text: String,
}

impl SourceDocument {
    /// Build a source from text already in memory.
    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Location of the markdown file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full markdown text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Fail with [`Doc2PdfError::InputNotFound`] unless `path` exists.
pub fn ensure_exists(path: &Path) -> Result<(), Doc2PdfError> {
    if path.exists() {
        return Ok(());
    }
    Err(Doc2PdfError::InputNotFound {
        path: path.to_path_buf(),
        cwd: current_dir_display(),
    })
}

/// Read the markdown file as UTF-8.
pub fn read_source(path: &Path) -> Result<SourceDocument, Doc2PdfError> {
    ensure_exists(path)?;

    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(Doc2PdfError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Doc2PdfError::InputNotFound {
                path: path.to_path_buf(),
                cwd: current_dir_display(),
            });
        }
        Err(e) => {
            return Err(Doc2PdfError::Internal(format!(
                "reading {}: {e}",
                path.display()
            )));
        }
    };

    let text = String::from_utf8(bytes).map_err(|e| Doc2PdfError::InvalidEncoding {
        path: path.to_path_buf(),
        detail: e.utf8_error().to_string(),
    })?;

    debug!("Read {} bytes of markdown from {}", text.len(), path.display());
    Ok(SourceDocument {
        path: path.to_path_buf(),
        text,
    })
}

fn current_dir_display() -> String {
    std::env::current_dir()
        .map(|d| d.display().to_string())
        .unwrap_or_else(|_| "<unknown>".to_string())
}
