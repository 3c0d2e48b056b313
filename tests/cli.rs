//! Tests for the `doc2pdf` binary: exit codes, fixed paths, remediation text.
//!
//! Each test runs the binary in its own temporary working directory.

use std::path::Path;
use std::process::{Command, Output};
use tarnet_doc2pdf::{INPUT_FILE, OUTPUT_FILE};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn doc2pdf(cwd: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_doc2pdf"));
    cmd.current_dir(cwd)
        .args(args)
        .env_remove("DOC2PDF_BACKEND")
        .env_remove("DOC2PDF_JSON")
        .env_remove("DOC2PDF_QUIET")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

fn write_input(dir: &Path) {
    std::fs::write(
        dir.join(INPUT_FILE),
        "# TARNET Project Documentation\n\n## Overview\n\nSome text.\n",
    )
    .unwrap();
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn missing_input_exits_one_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = doc2pdf(dir.path(), &[]).output().unwrap();

    assert_eq!(out.status.code(), Some(1));
    let text = stdout(&out);
    assert!(text.contains("not found"), "got: {text}");
    assert!(text.contains(INPUT_FILE), "got: {text}");
    assert!(!dir.path().join(OUTPUT_FILE).exists());
}

#[test]
fn json_mode_keeps_stdout_clean_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let out = doc2pdf(dir.path(), &["--json"]).output().unwrap();

    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).trim().is_empty(), "got: {}", stdout(&out));
    assert!(stderr(&out).contains("not found"));
}

#[test]
fn help_offers_no_path_flags() {
    let dir = tempfile::tempdir().unwrap();
    let out = doc2pdf(dir.path(), &["--help"]).output().unwrap();

    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("--backend"), "got: {text}");
    assert!(!text.contains("--input"));
    assert!(!text.contains("--output"));
}

#[test]
fn unknown_backend_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let out = doc2pdf(dir.path(), &["--backend", "wkhtmltopdf"])
        .output()
        .unwrap();

    assert!(!out.status.success());
    assert!(stderr(&out).contains("wkhtmltopdf"));
}

#[test]
fn no_usable_backend_prints_install_steps_for_both() {
    let dir = tempfile::tempdir().unwrap();
    write_input(dir.path());

    let out = doc2pdf(dir.path(), &["--backend", "pandoc"])
        .env("PATH", "")
        .env_remove("PANDOC_PATH")
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    let text = stdout(&out);
    assert!(text.contains("MISSING DEPENDENCIES"), "got: {text}");
    assert!(text.contains("html backend"), "got: {text}");
    assert!(text.contains("pandoc backend"), "got: {text}");
    assert!(!dir.path().join(OUTPUT_FILE).exists());
}

#[cfg(feature = "html")]
#[test]
fn default_run_writes_pdf_with_builtin_renderer() {
    let dir = tempfile::tempdir().unwrap();
    write_input(dir.path());

    let out = doc2pdf(dir.path(), &[]).output().unwrap();

    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("PDF saved to"), "got: {text}");
    assert!(text.contains("successfully with"), "got: {text}");
    let pdf = std::fs::read(dir.path().join(OUTPUT_FILE)).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
    assert!(pdf.len() > 500, "suspiciously small: {} bytes", pdf.len());
}

#[cfg(all(unix, feature = "pandoc"))]
mod fake_pandoc {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// A stand-in pandoc that answers `--version` and otherwise runs `body`.
    fn install(dir: &Path, body: &str) -> std::path::PathBuf {
        let path = dir.join("fake-pandoc");
        let script = format!(
            "#!/bin/sh\nif [ \"$1\" = \"--version\" ]; then echo 'pandoc 3.1.11'; exit 0; fi\n{body}\n"
        );
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    const WRITES_PDF: &str = r#"out=""
while [ $# -gt 0 ]; do
  if [ "$1" = "-o" ]; then out="$2"; shift; fi
  shift
done
printf '%%PDF-1.5 fake\n' > "$out""#;

    #[test]
    fn pandoc_backend_writes_fixed_output() {
        let dir = tempfile::tempdir().unwrap();
        let tools = tempfile::tempdir().unwrap();
        write_input(dir.path());
        let exe = install(tools.path(), WRITES_PDF);

        let out = doc2pdf(dir.path(), &["--backend", "pandoc"])
            .env("PANDOC_PATH", &exe)
            .output()
            .unwrap();

        assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
        assert!(stdout(&out).contains("PDF saved to"));
        let pdf = std::fs::read(dir.path().join(OUTPUT_FILE)).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn failing_pandoc_prints_manual_instructions() {
        let dir = tempfile::tempdir().unwrap();
        let tools = tempfile::tempdir().unwrap();
        write_input(dir.path());
        let exe = install(tools.path(), "echo 'xelatex not found' >&2\nexit 43");

        let out = doc2pdf(dir.path(), &["--backend", "pandoc"])
            .env("PANDOC_PATH", &exe)
            .output()
            .unwrap();

        assert_eq!(out.status.code(), Some(1));
        let text = stdout(&out);
        assert!(text.contains("MANUAL CONVERSION INSTRUCTIONS"), "got: {text}");
        assert!(text.contains("Option 1:"));
        assert!(text.contains("Option 4:"));
        assert!(!dir.path().join(OUTPUT_FILE).exists());
    }

    #[test]
    fn json_report_names_the_winning_backend() {
        let dir = tempfile::tempdir().unwrap();
        let tools = tempfile::tempdir().unwrap();
        write_input(dir.path());
        let exe = install(tools.path(), WRITES_PDF);

        let out = doc2pdf(dir.path(), &["--backend", "pandoc", "--json"])
            .env("PANDOC_PATH", &exe)
            .output()
            .unwrap();

        assert!(out.status.success(), "stderr: {}", stderr(&out));
        let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
        assert_eq!(report["backend"], "pandoc");
        assert_eq!(report["output_bytes"], 14);
        assert_eq!(report["attempts"][0]["outcome"]["status"], "succeeded");
    }
}
