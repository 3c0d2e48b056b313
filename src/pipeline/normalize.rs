//! Source normalisation: byte-level cleanup before markdown parsing.
//!
//! Documents edited on several machines pick up a BOM, CRLF line endings and
//! stray zero-width characters. Parsers tolerate most of this but the HTML
//! renderer prints the invisible characters as boxes, so they are removed
//! here.
//!
//! ## Rule Order
//!
//! Invisible characters go first so a BOM never shields the first line from
//! the line-ending pass; the final-newline pass runs last.

/// Apply all normalisation rules to the raw markdown.
///
/// Rules (applied in order):
/// 1. Strip invisible Unicode (BOM, zero-width spaces and joiners, word joiner)
/// 2. Normalise line endings (CRLF / CR → LF)
/// 3. Ensure the text ends with exactly one newline
pub fn normalize_source(input: &str) -> String {
    let s = remove_invisible_chars(input);
    let s = normalise_line_endings(&s);
    ensure_final_newline(&s)
}

// ── Rule 1: Remove invisible Unicode characters ─────────────────────────────

fn remove_invisible_chars(input: &str) -> String {
    input.replace(
        ['\u{200B}', '\u{FEFF}', '\u{200C}', '\u{200D}', '\u{2060}'],
        "",
    )
}

// ── Rule 2: Normalise line endings ───────────────────────────────────────────

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

// ── Rule 3: Ensure text ends with single newline ─────────────────────────────

fn ensure_final_newline(input: &str) -> String {
    let trimmed = input.trim_end_matches('\n');
    if trimmed.is_empty() {
        String::from("\n")
    } else {
        format!("{}\n", trimmed)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalise_line_endings() {
        assert_eq!(normalise_line_endings("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_remove_invisible() {
        let input = "\u{FEFF}# Title\nzero\u{200B}width\u{2060}";
        assert_eq!(remove_invisible_chars(input), "# Title\nzerowidth");
    }

    #[test]
    fn test_ensure_final_newline() {
        assert_eq!(ensure_final_newline("hello"), "hello\n");
        assert_eq!(ensure_final_newline("hello\n\n\n"), "hello\n");
        assert_eq!(ensure_final_newline(""), "\n");
    }

    #[test]
    fn keeps_hard_line_break_spaces() {
        // Two trailing spaces are a markdown hard break and must survive.
        assert_eq!(normalize_source("line one  \r\nline two"), "line one  \nline two\n");
    }

    #[test]
    fn bom_before_heading_is_removed() {
        let out = normalize_source("\u{FEFF}# TARNET\r\n");
        assert_eq!(out, "# TARNET\n");
    }
}
