//! Markdown → print HTML with fenced code blocks, tables and heading anchors.
//!
//! printpdf lays out a small subset of HTML. Paragraphs and inline spans
//! render; links, tables, `<pre>` and blockquotes either abort the layout or
//! vanish without a warning. So the parser events are written out as a flat
//! run of `<p class="…">` blocks with `<span class="…">` for inline styling:
//!
//! | Markdown          | Emitted as                                   |
//! |-------------------|----------------------------------------------|
//! | heading           | `<p class="h1" id="slug">` … `h6`            |
//! | paragraph         | `<p class="p">`, `quote` inside a blockquote |
//! | list item         | `<p class="li1">` with a `• ` or `1. ` marker |
//! | table row         | `<p class="th">` / `<p class="td">`, cells split by `\|` |
//! | fenced code line  | `<p class="pre">`, spaces made non-breaking  |
//! | link, emphasis, … | `<span class="link">`, `em`, `strong`, `code` |
//! | raw HTML          | dropped                                      |
//!
//! pulldown-cmark only emits heading ids that the author wrote explicitly
//! (`# Title {#id}`). The table of contents in the documentation links to
//! every heading, so ids are generated for the rest here.
//!
//! ## Slug rules
//!
//! 1. Drop every character that is not a word character, whitespace or `-`
//! 2. Trim and lowercase
//! 3. Collapse runs of whitespace and hyphens into one `-`
//! 4. Repeated slugs get `-2`, `-3`, … appended; explicit ids are reserved first

use super::template::escape_text;
use once_cell::sync::Lazy;
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

/// Print HTML for a markdown body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMarkup {
    pub html: String,
    /// Whether the source contains any visible text at all.
    pub has_text: bool,
}

/// Parser extensions used for the documentation.
pub fn markdown_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_HEADING_ATTRIBUTES | Options::ENABLE_STRIKETHROUGH
}

/// Render markdown to a print HTML fragment (no `<html>`/`<body>` wrapper).
pub fn markdown_to_html(markdown: &str) -> RenderedMarkup {
    let events: Vec<Event<'_>> = Parser::new_ext(markdown, markdown_options()).collect();
    let events = assign_heading_ids(events);

    let mut writer = PrintWriter::default();
    for ev in events {
        writer.event(ev);
    }
    if writer.dropped_html > 0 {
        debug!("Dropped {} raw HTML fragments", writer.dropped_html);
    }
    let html = writer.finish();
    debug!("Rendered {} bytes of markdown to {} bytes of HTML", markdown.len(), html.len());
    RenderedMarkup {
        html,
        has_text: writer.has_text,
    }
}

// ── Print writer ─────────────────────────────────────────────────────────────

/// An open container; closed by the matching `Event::End`.
enum Frame {
    Paragraph,
    Heading { level: usize, id: Option<String> },
    Quote,
    List { next: Option<u64> },
    Item,
    Code,
    Table,
    Head,
    Row,
    Cell,
    Span,
    Skip,
    Other,
}

#[derive(Default)]
struct PrintWriter {
    out: String,
    /// Inline content of the block being built.
    inline: String,
    code: String,
    row: Vec<String>,
    stack: Vec<Frame>,
    /// List marker waiting for the item's first block.
    marker: Option<String>,
    has_text: bool,
    dropped_html: usize,
}

impl PrintWriter {
    fn event(&mut self, ev: Event<'_>) {
        match ev {
            Event::Start(tag) => self.start(tag),
            Event::End(_) => self.end(),
            Event::Text(t) => {
                if self.skipping() {
                    return;
                }
                if !t.trim().is_empty() {
                    self.has_text = true;
                }
                if matches!(self.stack.last(), Some(Frame::Code)) {
                    self.code.push_str(&t);
                } else {
                    self.inline.push_str(&escape_text(&t));
                }
            }
            Event::Code(t) => {
                self.has_text |= !t.trim().is_empty();
                self.inline.push_str("<span class=\"code\">");
                self.inline.push_str(&escape_text(&t));
                self.inline.push_str("</span>");
            }
            Event::SoftBreak | Event::HardBreak => self.inline.push(' '),
            Event::Rule => {
                self.flush_pending();
                self.out.push_str("<p class=\"hr\">\u{00A0}</p>\n");
            }
            Event::TaskListMarker(done) => {
                self.inline.push_str(if done { "[x] " } else { "[ ] " });
            }
            Event::FootnoteReference(name) => {
                self.inline.push('[');
                self.inline.push_str(&escape_text(&name));
                self.inline.push(']');
            }
            Event::Html(_) | Event::InlineHtml(_) => self.dropped_html += 1,
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Paragraph => {
                self.flush_pending();
                Frame::Paragraph
            }
            Tag::Heading { level, id, .. } => {
                self.flush_pending();
                Frame::Heading {
                    level: level as usize,
                    id: id.map(|s| s.to_string()),
                }
            }
            Tag::BlockQuote(_) => {
                self.flush_pending();
                Frame::Quote
            }
            Tag::CodeBlock(_) => {
                self.flush_pending();
                self.code.clear();
                Frame::Code
            }
            Tag::List(start) => {
                self.flush_pending();
                Frame::List { next: start }
            }
            Tag::Item => {
                self.flush_pending();
                self.marker = Some(self.next_marker());
                Frame::Item
            }
            Tag::Table(_) => {
                self.flush_pending();
                Frame::Table
            }
            Tag::TableHead => {
                self.row.clear();
                Frame::Head
            }
            Tag::TableRow => {
                self.row.clear();
                Frame::Row
            }
            Tag::TableCell => {
                self.inline.clear();
                Frame::Cell
            }
            Tag::Emphasis => self.open_span("em"),
            Tag::Strong => self.open_span("strong"),
            Tag::Strikethrough => self.open_span("del"),
            Tag::Link { .. } => self.open_span("link"),
            Tag::Image { .. } => self.open_span("image"),
            Tag::HtmlBlock | Tag::MetadataBlock(_) => Frame::Skip,
            _ => Frame::Other,
        };
        self.stack.push(frame);
    }

    fn end(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        match frame {
            Frame::Paragraph => {
                let class = self.block_class();
                self.flush(&class, None);
            }
            Frame::Heading { level, id } => self.flush(&format!("h{level}"), id.as_deref()),
            Frame::Item => {
                self.flush_pending();
                self.marker = None;
            }
            Frame::Code => self.flush_code(),
            Frame::Head => self.flush_row("th"),
            Frame::Row => self.flush_row("td"),
            Frame::Cell => {
                let cell = std::mem::take(&mut self.inline);
                self.row.push(cell.trim().to_string());
            }
            Frame::Span => self.inline.push_str("</span>"),
            Frame::Quote | Frame::List { .. } | Frame::Table => self.flush_pending(),
            Frame::Skip | Frame::Other => {}
        }
    }

    fn open_span(&mut self, class: &str) -> Frame {
        self.inline.push_str("<span class=\"");
        self.inline.push_str(class);
        self.inline.push_str("\">");
        Frame::Span
    }

    fn skipping(&self) -> bool {
        self.stack.iter().any(|f| matches!(f, Frame::Skip))
    }

    fn next_marker(&mut self) -> String {
        let list = self
            .stack
            .iter_mut()
            .rev()
            .find_map(|f| match f {
                Frame::List { next } => Some(next),
                _ => None,
            });
        match list {
            Some(Some(n)) => {
                let marker = format!("{n}. ");
                *n += 1;
                marker
            }
            _ => "• ".to_string(),
        }
    }

    /// Class for body text at the current nesting.
    fn block_class(&self) -> String {
        let lists = self
            .stack
            .iter()
            .filter(|f| matches!(f, Frame::List { .. }))
            .count();
        if lists > 0 {
            format!("li{}", lists.min(3))
        } else if self.stack.iter().any(|f| matches!(f, Frame::Quote)) {
            "quote".to_string()
        } else {
            "p".to_string()
        }
    }

    /// Emit loose inline text (a tight list item, text before a nested block).
    fn flush_pending(&mut self) {
        if self.inline.trim().is_empty() {
            self.inline.clear();
            return;
        }
        let class = self.block_class();
        self.flush(&class, None);
    }

    fn flush(&mut self, class: &str, id: Option<&str>) {
        let content = std::mem::take(&mut self.inline);
        let marker = self.marker.take();
        if content.trim().is_empty() && marker.is_none() {
            return;
        }
        self.out.push_str("<p class=\"");
        self.out.push_str(class);
        self.out.push('"');
        if let Some(id) = id {
            self.out.push_str(" id=\"");
            self.out.push_str(&escape_text(id));
            self.out.push('"');
        }
        self.out.push('>');
        if let Some(marker) = marker {
            self.out.push_str(&marker);
        }
        self.out.push_str(content.trim());
        self.out.push_str("</p>\n");
    }

    fn flush_row(&mut self, class: &str) {
        let cells = std::mem::take(&mut self.row);
        if cells.iter().all(|c| c.is_empty()) {
            return;
        }
        self.out.push_str("<p class=\"");
        self.out.push_str(class);
        self.out.push_str("\">");
        self.out.push_str(&cells.join(" | "));
        self.out.push_str("</p>\n");
    }

    /// One block per source line; the layout engine collapses whitespace, so
    /// indentation is kept with non-breaking spaces.
    fn flush_code(&mut self) {
        let code = std::mem::take(&mut self.code);
        for line in code.trim_end_matches('\n').split('\n') {
            let text = escape_text(line.trim_end())
                .replace('\t', "    ")
                .replace(' ', "\u{00A0}");
            self.out.push_str("<p class=\"pre\">");
            self.out.push_str(if text.is_empty() { "\u{00A0}" } else { text.as_str() });
            self.out.push_str("</p>\n");
        }
    }

    fn finish(&mut self) -> String {
        self.flush_pending();
        std::mem::take(&mut self.out)
    }
}

// ── Heading anchors ──────────────────────────────────────────────────────────

fn assign_heading_ids(mut events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut registry = SlugRegistry::default();

    for ev in &events {
        if let Event::Start(Tag::Heading { id: Some(id), .. }) = ev {
            registry.reserve(id);
        }
    }

    for i in 0..events.len() {
        if !matches!(events[i], Event::Start(Tag::Heading { id: None, .. })) {
            continue;
        }
        let slug = registry.unique(&slugify(&heading_text(&events[i + 1..])));
        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
            *id = Some(CowStr::from(slug));
        }
    }

    events
}

/// Plain text of a heading, up to its closing tag.
fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for ev in events {
        match ev {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            _ => {}
        }
    }
    text
}

static RE_SLUG_STRIP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").unwrap());
static RE_SLUG_HYPHENATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-\s]+").unwrap());

/// Turn heading text into an anchor id.
pub fn slugify(text: &str) -> String {
    let stripped = RE_SLUG_STRIP.replace_all(text, "");
    let lowered = stripped.trim().to_lowercase();
    let slug = RE_SLUG_HYPHENATE.replace_all(&lowered, "-").into_owned();
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    }
}

#[derive(Default)]
struct SlugRegistry {
    seen: HashMap<String, usize>,
}

impl SlugRegistry {
    fn reserve(&mut self, id: &str) {
        self.seen.entry(id.to_string()).or_insert(1);
    }

    fn unique(&mut self, base: &str) -> String {
        let Some(count) = self.seen.get(base).copied() else {
            self.seen.insert(base.to_string(), 1);
            return base.to_string();
        };

        let mut n = count + 1;
        let mut candidate = format!("{base}-{n}");
        while self.seen.contains_key(&candidate) {
            n += 1;
            candidate = format!("{base}-{n}");
        }
        self.seen.insert(base.to_string(), n);
        self.seen.insert(candidate.clone(), 1);
        candidate
    }
}
