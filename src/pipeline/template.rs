//! The fixed print stylesheet and the HTML document wrapper.

/// Print stylesheet applied to every conversion: A4, 2cm margins, serif body,
/// ruled headings, shaded code lines and banded table rows.
///
/// The markup only contains `<p>` and `<span>` elements, so every rule is a
/// class selector matching the classes [`super::markup`] emits.
pub const STYLESHEET: &str = r#"
@page {
    size: A4;
    margin: 2cm;
}
body {
    font-family: 'Georgia', 'Times New Roman', serif;
    line-height: 1.6;
    color: #333333;
}
p {
    margin: 0;
}
.p {
    margin-bottom: 8px;
}
.h1 {
    color: #2c3e50;
    font-size: 24px;
    font-weight: bold;
    border-bottom: 3px solid #3498db;
    padding-bottom: 10px;
    margin-bottom: 12px;
}
.h2 {
    color: #34495e;
    font-size: 20px;
    font-weight: bold;
    border-bottom: 2px solid #95a5a6;
    padding-bottom: 5px;
    margin-top: 30px;
    margin-bottom: 10px;
}
.h3 {
    color: #7f8c8d;
    font-size: 17px;
    font-weight: bold;
    margin-top: 25px;
    margin-bottom: 8px;
}
.h4, .h5, .h6 {
    color: #7f8c8d;
    font-size: 14px;
    font-weight: bold;
    margin-top: 15px;
}
.pre {
    font-family: 'Courier New', monospace;
    font-size: 12px;
    background-color: #f4f4f4;
    border-left: 4px solid #3498db;
    padding-left: 15px;
}
.code {
    font-family: 'Courier New', monospace;
    background-color: #f4f4f4;
}
.th {
    background-color: #3498db;
    color: #ffffff;
    font-weight: bold;
    padding: 6px;
}
.td {
    background-color: #f9f9f9;
    border-bottom: 1px solid #dddddd;
    padding: 6px;
}
.quote {
    border-left: 4px solid #3498db;
    background-color: #ecf0f1;
    font-style: italic;
    padding: 10px 20px;
    margin-bottom: 8px;
}
.li1 {
    padding-left: 30px;
    margin-bottom: 5px;
}
.li2 {
    padding-left: 60px;
    margin-bottom: 5px;
}
.li3 {
    padding-left: 90px;
    margin-bottom: 5px;
}
.hr {
    border-bottom: 1px solid #95a5a6;
    margin-bottom: 12px;
}
.strong {
    color: #2c3e50;
    font-weight: bold;
}
.em {
    font-style: italic;
}
.del {
    color: #7f8c8d;
}
.link {
    color: #3498db;
}
.image {
    color: #7f8c8d;
    font-style: italic;
}
"#;

/// Wrap an HTML fragment in a complete, styled document.
pub fn wrap_document(title: &str, body_html: &str) -> String {
    let mut doc = String::with_capacity(STYLESHEET.len() + body_html.len() + 256);
    doc.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n");
    doc.push_str("<title>");
    doc.push_str(&escape_text(title));
    doc.push_str("</title>\n<style>");
    doc.push_str(STYLESHEET);
    doc.push_str("</style>\n</head>\n<body>\n");
    doc.push_str(body_html);
    doc.push_str("</body>\n</html>\n");
    doc
}

pub(crate) fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
