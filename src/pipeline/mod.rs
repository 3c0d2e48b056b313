//! Pipeline stages shared by the backends.
//!
//! Each submodule implements exactly one transformation step, so each is
//! testable without a PDF renderer present.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ normalize ──▶ markup ──▶ template ──▶ (backend) ──▶ write
//! (read)    (BOM, CRLF)   (HTML)     (CSS wrap)   (PDF bytes)   (atomic)
//! ```
//!
//! 1. [`input`]    : confirm the markdown file exists and read it as UTF-8
//! 2. [`normalize`]: byte-level cleanup before parsing
//! 3. [`markup`]   : markdown → flat print HTML (`<p>`/`<span>` with classes)
//! 4. [`template`] : wrap the HTML body in the fixed print stylesheet
//! 5. [`write`]    : place the PDF at its destination via temp file + rename
//!
//! The pandoc backend only uses stages 1 and 5; pandoc does its own parsing.

pub mod input;
pub mod markup;
pub mod normalize;
pub mod template;
pub mod write;

use input::SourceDocument;
use markup::RenderedMarkup;

/// Run the markdown stages: normalise, convert to HTML, wrap in the
/// stylesheet. The document title is the source file stem.
///
/// The returned `html` is the complete document; `has_text` is carried over
/// from the markdown so the renderer can tell an empty layout from an empty
/// source.
pub fn build_html(source: &SourceDocument) -> RenderedMarkup {
    let text = normalize::normalize_source(source.text());
    let body = markup::markdown_to_html(&text);
    let title = source
        .path()
        .file_stem()
        .map(|s| s.to_string_lossy().replace('_', " "))
        .unwrap_or_default();
    RenderedMarkup {
        html: template::wrap_document(&title, &body.html),
        has_text: body.has_text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_html_runs_every_stage() {
        let src = SourceDocument::from_text(
            "TARNET_Project_Documentation.md",
            "\u{FEFF}# TARNET\r\n\r\n| a | b |\r\n| - | - |\r\n| 1 | 2 |\r\n",
        );
        let doc = build_html(&src);
        let html = &doc.html;
        assert!(doc.has_text);
        assert!(html.contains("<title>TARNET Project Documentation</title>"));
        assert!(html.contains(r#"<p class="h1" id="tarnet">TARNET</p>"#), "got: {html}");
        assert!(html.contains(r#"<p class="td">1 | 2</p>"#), "got: {html}");
        assert!(!html.contains('\u{FEFF}'));
    }
}
