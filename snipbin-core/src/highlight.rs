//! Static highlight rendering.
//!
//! Produces the pre-rendered HTML document served by the highlight
//! endpoint. Pure: the same `(source, style, linenos)` triple always yields
//! the same markup. The style is carried as a CSS class on the wrapping
//! `div`, so a stylesheet can theme the output without re-rendering.

use std::fmt::Write as _;

use crate::snippet::HighlightStyle;

/// Renders a snippet's source as a standalone HTML document.
#[must_use]
pub fn render(source: &str, style: HighlightStyle, linenos: bool) -> String {
    let mut doc = String::with_capacity(source.len() + 256);
    doc.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n</head>\n<body>\n");
    let _ = writeln!(doc, "<div class=\"highlight {style}\">");
    doc.push_str("<pre>");
    if linenos {
        push_numbered(&mut doc, source);
    } else {
        doc.push_str(&escape(source));
    }
    doc.push_str("</pre>\n</div>\n</body>\n</html>\n");
    doc
}

/// Appends the source with a right-aligned line-number gutter.
fn push_numbered(doc: &mut String, source: &str) {
    let total = source.lines().count();
    let width = total.max(1).to_string().len();
    for (index, line) in source.lines().enumerate() {
        if index > 0 {
            doc.push('\n');
        }
        let number = index + 1;
        let _ = write!(doc, "<span class=\"lineno\">{number:>width$}</span> ");
        doc.push_str(&escape(line));
    }
}

/// Escapes text for inclusion in HTML element content and attributes.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
