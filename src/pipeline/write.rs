//! Output placement: temp file in the destination directory, then rename.
//!
//! A backend that dies half-way leaves at most a stray temp file (removed on
//! drop), never a truncated PDF under the real name. The temp file lives next
//! to the destination so the final rename stays on one filesystem.

use crate::error::BackendError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Create an empty `.pdf` temp file beside `output` for a backend to fill.
pub fn stage(output: &Path) -> Result<NamedTempFile, BackendError> {
    let dir = destination_dir(output);
    std::fs::create_dir_all(&dir).map_err(|e| write_error(output, e))?;

    tempfile::Builder::new()
        .prefix(".doc2pdf-")
        .suffix(".pdf")
        .tempfile_in(&dir)
        .map_err(|e| write_error(output, e))
}

/// Move a filled temp file onto `output`, replacing any existing file.
///
/// Returns the size of the committed PDF. An empty temp file is rejected
/// with [`BackendError::EmptyOutput`] and `output` is left untouched.
pub fn commit(staged: NamedTempFile, output: &Path) -> Result<u64, BackendError> {
    // By path, not handle: external tools may replace the file they were given.
    let len = std::fs::metadata(staged.path())
        .map_err(|e| write_error(output, e))?
        .len();
    if len == 0 {
        return Err(BackendError::EmptyOutput);
    }

    staged
        .persist(output)
        .map_err(|e| write_error(output, e.error))?;
    debug!("Committed {} bytes to {}", len, output.display());
    Ok(len)
}

/// Write `bytes` to `output` atomically.
pub fn write_atomic(output: &Path, bytes: &[u8]) -> Result<u64, BackendError> {
    if bytes.is_empty() {
        return Err(BackendError::EmptyOutput);
    }
    let mut staged = stage(output)?;
    staged
        .write_all(bytes)
        .and_then(|_| staged.flush())
        .map_err(|e| write_error(output, e))?;
    commit(staged, output)
}

fn destination_dir(output: &Path) -> PathBuf {
    match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn write_error(path: &Path, e: std::io::Error) -> BackendError {
    BackendError::OutputWrite {
        path: path.to_path_buf(),
        detail: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("doc.pdf");

        assert_eq!(write_atomic(&out, b"%PDF-first").unwrap(), 10);
        assert_eq!(write_atomic(&out, b"%PDF-2").unwrap(), 6);
        assert_eq!(std::fs::read(&out).unwrap(), b"%PDF-2");
    }

    #[test]
    fn empty_bytes_leave_destination_alone() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("doc.pdf");
        std::fs::write(&out, b"%PDF-old").unwrap();

        assert!(matches!(write_atomic(&out, b""), Err(BackendError::EmptyOutput)));
        assert_eq!(std::fs::read(&out).unwrap(), b"%PDF-old");
    }

    #[test]
    fn unfilled_stage_is_rejected_and_cleaned_up() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("doc.pdf");

        let staged = stage(&out).unwrap();
        let staged_path = staged.path().to_path_buf();
        assert!(matches!(commit(staged, &out), Err(BackendError::EmptyOutput)));
        assert!(!out.exists());
        assert!(!staged_path.exists());
    }

    #[test]
    fn creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/out/doc.pdf");
        write_atomic(&out, b"%PDF").unwrap();
        assert!(out.exists());
    }

    #[test]
    fn bare_file_name_stages_in_current_dir() {
        assert_eq!(destination_dir(Path::new("doc.pdf")), PathBuf::from("."));
    }
}
