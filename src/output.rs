//! Result types describing what a conversion run did.

use crate::error::BackendError;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Summary of a successful conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    /// Name of the backend that produced the PDF.
    pub backend: String,
    /// Where the PDF was written.
    pub output: PathBuf,
    /// Size of the written PDF in bytes.
    pub output_bytes: u64,
    /// Wall-clock time for the whole run, including failed attempts.
    pub total_duration_ms: u64,
    /// Every backend considered, in fallback order, up to and including the
    /// one that succeeded.
    pub attempts: Vec<BackendAttempt>,
}

impl ConversionReport {
    /// Backends that were tried and failed before the winner.
    pub fn failed_attempts(&self) -> impl Iterator<Item = &BackendAttempt> {
        self.attempts
            .iter()
            .filter(|a| matches!(a.outcome, AttemptOutcome::Failed(_)))
    }
}

/// One step of the fallback sequence.
#[derive(Debug, Clone, Serialize)]
pub struct BackendAttempt {
    pub backend: String,
    pub outcome: AttemptOutcome,
    pub duration_ms: u64,
}

/// How a single backend fared.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// PDF written; carries its size in bytes.
    Succeeded(u64),
    /// Backend skipped by the availability check.
    Unavailable(String),
    /// Backend ran and failed.
    Failed(BackendError),
}

impl fmt::Display for BackendAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            AttemptOutcome::Succeeded(bytes) => write!(f, "{}: wrote {bytes} bytes", self.backend),
            AttemptOutcome::Unavailable(reason) => {
                write!(f, "{}: unavailable ({reason})", self.backend)
            }
            AttemptOutcome::Failed(err) => write!(f, "{}: {err}", self.backend),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attempt_display_names_backend() {
        let a = BackendAttempt {
            backend: "pandoc".into(),
            outcome: AttemptOutcome::Unavailable("not on PATH".into()),
            duration_ms: 0,
        };
        assert_eq!(a.to_string(), "pandoc: unavailable (not on PATH)");
    }

    #[test]
    fn report_serialises_with_tagged_outcomes() {
        let report = ConversionReport {
            backend: "pandoc".into(),
            output: PathBuf::from("out.pdf"),
            output_bytes: 2048,
            total_duration_ms: 15,
            attempts: vec![
                BackendAttempt {
                    backend: "html".into(),
                    outcome: AttemptOutcome::Failed(BackendError::Render("bad css".into())),
                    duration_ms: 5,
                },
                BackendAttempt {
                    backend: "pandoc".into(),
                    outcome: AttemptOutcome::Succeeded(2048),
                    duration_ms: 10,
                },
            ],
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["backend"], "pandoc");
        assert_eq!(json["attempts"][0]["outcome"]["status"], "failed");
        assert_eq!(json["attempts"][1]["outcome"]["status"], "succeeded");
        assert_eq!(json["attempts"][1]["outcome"]["detail"], 2048);
        assert_eq!(report.failed_attempts().count(), 1);
    }
}
