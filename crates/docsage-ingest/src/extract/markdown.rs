//! Markdown adapter: renders the document and keeps only its text.

use pulldown_cmark::{html, Options, Parser};
use scraper::Html;

use super::html::{block_text, normalize_lines};
use super::text::decode_utf8;
use docsage_core::{FileType, Result};

pub fn extract(bytes: &[u8]) -> Result<String> {
    let source = decode_utf8(bytes, FileType::Markdown)?;
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut rendered = String::new();
    html::push_html(&mut rendered, Parser::new_ext(&source, options));
    Ok(normalize_lines(&block_text(&Html::parse_fragment(&rendered))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_is_removed() {
        let md = b"# Title\n\nSome **bold** and _italic_ text with `code`.\n\n- one\n- two\n";
        let text = extract(md).unwrap();
        assert_eq!(text, "Title\nSome bold and italic text with code.\none\ntwo");
    }

    #[test]
    fn test_links_keep_their_label() {
        let text = extract(b"See [the docs](https://example.com/docs).").unwrap();
        assert_eq!(text, "See the docs.");
    }

    #[test]
    fn test_inline_html_is_stripped() {
        let text = extract(b"<div>Boxed <b>note</b></div>\n\nAfter").unwrap();
        assert!(text.contains("Boxed"));
        assert!(text.contains("After"));
        assert!(!text.contains("<div>"));
    }

    #[test]
    fn test_table_rows_on_separate_lines() {
        let md = b"| a | b |\n|---|---|\n| 1 | 2 |\n";
        let text = extract(md).unwrap();
        assert_eq!(text, "a b\n1 2");
    }

    #[test]
    fn test_nested_list_items_on_own_lines() {
        let text = extract(b"- parent\n  - child\n").unwrap();
        assert_eq!(text, "parent\nchild");
    }

    #[test]
    fn test_blockquote_then_paragraph() {
        let text = extract(b"> quoted\n\nplain\n").unwrap();
        assert_eq!(text, "quoted\nplain");
    }

    #[test]
    fn test_code_block_keeps_lines() {
        let text = extract(b"```\nlet a = 1;\nlet b = 2;\n```\n").unwrap();
        assert_eq!(text, "let a = 1;\nlet b = 2;");
    }
}
