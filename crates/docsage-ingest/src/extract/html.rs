//! HTML adapter.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node};

use super::text::decode_utf8;
use docsage_core::{FileType, Result};

/// Elements whose content is never visible text.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style"];

/// Elements rendered on their own line.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "blockquote", "dd", "div", "dl", "dt", "figure", "footer", "h1", "h2",
    "h3", "h4", "h5", "h6", "header", "hr", "li", "ol", "p", "pre", "section", "table", "tbody",
    "thead", "tr", "ul",
];

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

pub fn extract(bytes: &[u8]) -> Result<String> {
    let source = decode_utf8(bytes, FileType::Html)?;
    let document = Html::parse_document(&source);
    Ok(normalize_lines(&visible_text(&document, "\n")))
}

/// Concatenate every text node outside `<script>`/`<style>`, each followed by `separator`.
pub fn visible_text(document: &Html, separator: &str) -> String {
    let mut out = String::new();
    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|e| SKIPPED_ELEMENTS.contains(&e.name()))
        });
        if !hidden {
            out.push_str(text);
            out.push_str(separator);
        }
    }
    out
}

/// Visible text with a newline around every block element and a space after
/// each table cell; inline runs stay on one line.
pub fn block_text(document: &Html) -> String {
    let mut out = String::new();
    push_block_text(document.root_element(), &mut out);
    out
}

fn push_block_text(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if SKIPPED_ELEMENTS.contains(&name) {
        return;
    }
    if name == "br" {
        out.push('\n');
        return;
    }
    let block = BLOCK_ELEMENTS.contains(&name);
    if block {
        out.push('\n');
    }
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(el) = ElementRef::wrap(child) {
                    push_block_text(el, out);
                }
            }
            _ => {}
        }
    }
    if block {
        out.push('\n');
    } else if matches!(name, "td" | "th") {
        out.push(' ');
    }
}

/// Collapse whitespace runs within each line and drop blank lines.
pub fn normalize_lines(raw: &str) -> String {
    raw.lines()
        .map(|line| WHITESPACE_RUN.replace_all(line.trim(), " ").into_owned())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_script_and_style() {
        let html = b"<html><head><style>body { color: red; }</style></head>\
            <body><script>alert(1)</script><p>Hello</p><p>World</p></body></html>";
        let text = extract(html).unwrap();
        assert_eq!(text, "Hello\nWorld");
    }

    #[test]
    fn test_collapses_whitespace_and_drops_empty_lines() {
        let html = b"<div>\n\n   Lots    of\tspace   \n\n</div><p>  </p><span>end</span>";
        let text = extract(html).unwrap();
        assert_eq!(text, "Lots of space\nend");
    }

    #[test]
    fn test_entities_are_decoded() {
        let text = extract(b"<p>Fish &amp; chips</p>").unwrap();
        assert_eq!(text, "Fish & chips");
    }

    #[test]
    fn test_invalid_utf8_is_decode_error() {
        assert!(extract(b"<p>\xff</p>").is_err());
    }
}
