//! Human-readable guidance printed when a conversion cannot complete.
//!
//! Two texts exist: one for "nothing can run here" (install something) and
//! one for "everything ran and failed" (convert by hand). Both always name
//! every backend, whether or not it was in the attempted sequence, so the
//! reader learns all the ways out.

use crate::backend::is_linked;
use crate::config::{BackendKind, ConversionConfig};
use crate::error::MissingBackend;

/// Pandoc installation page.
pub const PANDOC_INSTALL_URL: &str = "https://pandoc.org/installing.html";

/// Hosted converter suggested as a last resort.
pub const ONLINE_CONVERTER_URL: &str = "https://www.markdowntopdf.com/";

/// Install instructions for when no backend is available.
pub fn missing_dependencies(missing: &[MissingBackend]) -> String {
    let mut text = String::from("No PDF backend is usable in this environment:\n");
    for m in missing {
        text.push_str(&format!("  • {}: {}\n", m.name, m.reason));
    }

    text.push_str(&format!(
        "\nTo enable the {} backend (built-in HTML renderer):\n",
        BackendKind::Html
    ));
    if is_linked(BackendKind::Html) {
        text.push_str("  it is compiled into this build; select it with `--backend html`\n");
    } else {
        text.push_str(&format!(
            "  cargo install tarnet-doc2pdf --features {}\n",
            BackendKind::Html.feature()
        ));
    }

    text.push_str(&format!(
        "\nTo enable the {} backend (alternative):\n",
        BackendKind::Pandoc
    ));
    text.push_str(&format!("  Install pandoc: {PANDOC_INSTALL_URL}\n"));
    text.push_str("  Install a LaTeX engine providing xelatex (TeX Live, MiKTeX)\n");
    text.push_str("  or point PANDOC_PATH at an existing pandoc executable\n");
    text
}

/// Manual workarounds for when every backend failed.
pub fn manual_instructions(config: &ConversionConfig) -> String {
    let input = config.input.display();
    let output = config.output.display();
    let engine = &config.pandoc.pdf_engine;

    let mut text = String::new();
    text.push_str("Option 1: Use Pandoc (recommended for best quality)\n");
    text.push_str(&format!("  Install: {PANDOC_INSTALL_URL}\n"));
    text.push_str(&format!(
        "  Then run: pandoc {input} -o {output} --pdf-engine={engine} --toc\n"
    ));
    text.push_str("\nOption 2: Use online converter\n");
    text.push_str(&format!("  Upload to: {ONLINE_CONVERTER_URL}\n"));
    text.push_str("\nOption 3: Use VS Code\n");
    text.push_str("  Install 'Markdown PDF' extension\n");
    text.push_str("  Right-click markdown file → 'Markdown PDF: Export (pdf)'\n");
    text.push_str("\nOption 4: Rebuild with both backends\n");
    text.push_str(&format!(
        "  cargo install tarnet-doc2pdf --features {},{}\n",
        BackendKind::Html.feature(),
        BackendKind::Pandoc.feature()
    ));
    text.push_str("  doc2pdf\n");
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_text_names_both_backends() {
        let text = missing_dependencies(&[MissingBackend {
            name: "pandoc".into(),
            reason: "pandoc executable not found on PATH".into(),
        }]);
        assert!(text.contains("html backend"), "got: {text}");
        assert!(text.contains("pandoc backend"), "got: {text}");
        assert!(text.contains("not found on PATH"));
        assert!(text.contains(PANDOC_INSTALL_URL));
    }

    #[test]
    fn manual_instructions_list_four_options() {
        let text = manual_instructions(&ConversionConfig::default());
        for n in 1..=4 {
            assert!(text.contains(&format!("Option {n}:")), "missing option {n}");
        }
        assert!(text.contains(
            "pandoc TARNET_Project_Documentation.md -o TARNET_Project_Documentation.pdf"
        ));
        assert!(text.contains(ONLINE_CONVERTER_URL));
    }
}
