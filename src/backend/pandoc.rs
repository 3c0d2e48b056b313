//! Secondary backend: the pandoc executable with a LaTeX PDF engine.
//!
//! pandoc reads the markdown file itself and writes into a staged temp file
//! beside the destination; the temp file is renamed over the destination only
//! after pandoc exits successfully and the file is non-empty.

use super::{Availability, Backend};
use crate::config::PandocOptions;
use crate::error::BackendError;
use crate::pipeline::input::SourceDocument;
use crate::pipeline::write;
use pandoc_locate::{ensure_pandoc, find_executable};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

/// How many trailing stderr lines are kept in a [`BackendError::ToolFailed`].
const STDERR_TAIL_LINES: usize = 12;

/// Shells out to pandoc.
#[derive(Debug, Clone)]
pub struct PandocBackend {
    options: PandocOptions,
    /// Fixed executable; `None` means discover via `pandoc-locate`.
    executable: Option<PathBuf>,
}

impl PandocBackend {
    pub fn new(options: PandocOptions) -> Self {
        Self {
            options,
            executable: None,
        }
    }

    /// Use `executable` instead of searching for pandoc.
    pub fn with_executable(options: PandocOptions, executable: impl Into<PathBuf>) -> Self {
        Self {
            options,
            executable: Some(executable.into()),
        }
    }

    fn resolve(&self) -> Result<(PathBuf, String), String> {
        if let Some(ref exe) = self.executable {
            return if exe.is_file() {
                Ok((exe.clone(), "custom".to_string()))
            } else {
                Err(format!("{} does not exist", exe.display()))
            };
        }
        ensure_pandoc()
            .map(|install| (install.path, install.version))
            .map_err(|e| e.to_string())
    }

    /// Full argument list for one run.
    fn args(&self, source: &Path, target: &Path) -> Vec<std::ffi::OsString> {
        let mut args: Vec<std::ffi::OsString> = vec![
            source.as_os_str().to_owned(),
            "--from=markdown".into(),
            "-o".into(),
            target.as_os_str().to_owned(),
        ];
        args.extend(self.options.to_args().into_iter().map(Into::into));
        args
    }
}

impl Backend for PandocBackend {
    fn name(&self) -> &str {
        "pandoc"
    }

    fn availability(&self) -> Availability {
        match self.resolve() {
            Ok((path, version)) => {
                Availability::Ready(format!("pandoc {version} at {}", path.display()))
            }
            Err(reason) => Availability::Missing(reason),
        }
    }

    fn convert(&self, source: &SourceDocument, output: &Path) -> Result<u64, BackendError> {
        let (program, version) = self.resolve().map_err(BackendError::Unavailable)?;
        let program_name = program.display().to_string();
        debug!("Using pandoc {} at {}", version, program_name);

        if find_executable(&self.options.pdf_engine).is_none() {
            warn!(
                "PDF engine '{}' not found on PATH; pandoc will likely fail",
                self.options.pdf_engine
            );
        }

        let staged = write::stage(output)?;
        // pandoc parses the file itself; only the path is passed on.
        let args = self.args(source.path(), staged.path());
        info!("Running {} with {} arguments", program_name, args.len());

        let result = Command::new(&program)
            .args(&args)
            .output()
            .map_err(|e| BackendError::Spawn {
                program: program_name.clone(),
                detail: e.to_string(),
            })?;

        if !result.status.success() {
            return Err(BackendError::ToolFailed {
                program: program_name,
                status: result.status.to_string(),
                stderr: stderr_tail(&result.stderr),
            });
        }

        write::commit(staged, output)
    }
}

/// Last few lines of a tool's stderr, lossily decoded.
fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}
