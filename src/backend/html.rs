//! Primary backend: Markdown → styled HTML → PDF, all in-process.
//!
//! The HTML comes from [`crate::pipeline::build_html`]; printpdf lays it out
//! and serialises the PDF. Nothing outside the binary is needed, so this
//! backend is ready whenever the `html` feature is on.
//!
//! printpdf skips markup it cannot lay out instead of failing. A layout that
//! holds no text for a source that has some is therefore reported as a
//! render error, so the next backend gets a chance.

use super::{Availability, Backend};
use crate::error::BackendError;
use crate::pipeline::input::SourceDocument;
use crate::pipeline::{self, write};
use printpdf::{GeneratePdfOptions, Op, PdfDocument, PdfSaveOptions, TextItem};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// In-process HTML renderer backed by printpdf.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlBackend;

impl HtmlBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for HtmlBackend {
    fn name(&self) -> &str {
        "html"
    }

    fn availability(&self) -> Availability {
        Availability::Ready("printpdf HTML renderer (built in)".to_string())
    }

    fn convert(&self, source: &SourceDocument, output: &Path) -> Result<u64, BackendError> {
        let markup = pipeline::build_html(source);
        info!("Rendering {} bytes of styled HTML", markup.html.len());

        let doc = layout(&markup.html)?;
        let text = laid_out_text(&doc);
        debug!("Layout holds {} characters of text", text.chars().count());
        if markup.has_text && text.trim().is_empty() {
            return Err(BackendError::Render(
                "layout produced no text; the markup was not rendered".to_string(),
            ));
        }

        let bytes = save(&doc)?;
        write::write_atomic(output, &bytes)
    }
}

/// Lay out a complete HTML document.
fn layout(html: &str) -> Result<PdfDocument, BackendError> {
    let images = BTreeMap::new();
    let fonts = BTreeMap::new();
    let mut warnings = Vec::new();

    let doc = PdfDocument::from_html(
        html,
        &images,
        &fonts,
        &GeneratePdfOptions::default(),
        &mut warnings,
    )
    .map_err(BackendError::Render)?;

    for w in &warnings {
        debug!("printpdf layout: {:?}", w);
    }
    Ok(doc)
}

fn save(doc: &PdfDocument) -> Result<Vec<u8>, BackendError> {
    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    for w in &warnings {
        debug!("printpdf save: {:?}", w);
    }

    if bytes.is_empty() {
        return Err(BackendError::EmptyOutput);
    }
    Ok(bytes)
}

/// Every text run written on any page, in page order.
fn laid_out_text(doc: &PdfDocument) -> String {
    let mut text = String::new();
    for page in &doc.pages {
        for op in &page.ops {
            let items = match op {
                Op::WriteText { items, .. } | Op::WriteTextBuiltinFont { items, .. } => items,
                _ => continue,
            };
            for item in items {
                if let TextItem::Text(t) = item {
                    text.push_str(t);
                    text.push(' ');
                }
            }
        }
    }
    text
}
