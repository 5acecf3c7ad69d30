//! Word (.docx) adapter.
//!
//! Reads `word/document.xml` from the OOXML archive. Body paragraphs come
//! first, one per line, followed by the text of every table cell, one cell
//! per line.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use docsage_core::{Error, FileType, Result};

const DOCUMENT_PART: &str = "word/document.xml";
/// Decompressed size cap for the document part.
const MAX_PART_BYTES: u64 = 50 * 1024 * 1024;

fn fail(cause: impl std::fmt::Display) -> Error {
    Error::extraction(FileType::Word, cause)
}

pub fn extract(bytes: &[u8]) -> Result<String> {
    let xml = read_document_part(bytes)?;
    let (paragraphs, cells) = walk_body(&xml)?;

    let mut out = String::new();
    for line in paragraphs.iter().chain(cells.iter()) {
        out.push_str(line);
        out.push('\n');
    }
    Ok(out)
}

fn read_document_part(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(fail)?;
    let entry = archive.by_name(DOCUMENT_PART).map_err(fail)?;

    let mut xml = Vec::new();
    entry
        .take(MAX_PART_BYTES)
        .read_to_end(&mut xml)
        .map_err(fail)?;
    if xml.len() as u64 >= MAX_PART_BYTES {
        return Err(fail(format!("{} exceeds size limit", DOCUMENT_PART)));
    }
    Ok(xml)
}

/// Returns (top-level paragraphs, table cells) in document order.
fn walk_body(xml: &[u8]) -> Result<(Vec<String>, Vec<String>)> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();

    let mut paragraphs = Vec::new();
    let mut cells = Vec::new();
    let mut cell_paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut table_depth = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf).map_err(fail)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"tbl" => table_depth += 1,
                b"p" => current.clear(),
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" => current.push('\t'),
                b"br" | b"cr" => current.push('\n'),
                b"p" if table_depth == 0 => paragraphs.push(String::new()),
                b"p" => cell_paragraphs.push(String::new()),
                _ => {}
            },
            Event::Text(t) if in_text => {
                current.push_str(&t.unescape().map_err(fail)?);
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    let text = std::mem::take(&mut current);
                    if table_depth == 0 {
                        paragraphs.push(text);
                    } else {
                        cell_paragraphs.push(text);
                    }
                }
                b"tc" if table_depth == 1 => {
                    cells.push(cell_paragraphs.join("\n"));
                    cell_paragraphs.clear();
                }
                b"tbl" => table_depth = table_depth.saturating_sub(1),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok((paragraphs, cells))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    /// Wrap a `<w:body>` fragment into a minimal .docx archive.
    fn docx_with_body(body: &str) -> Vec<u8> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        );
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            writer
                .start_file(DOCUMENT_PART, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        cursor.into_inner()
    }

    fn para(text: &str) -> String {
        format!(r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#, text)
    }

    #[test]
    fn test_paragraphs_then_table_cells() {
        let body = format!(
            "{}<w:tbl><w:tr><w:tc>{}</w:tc><w:tc>{}</w:tc></w:tr></w:tbl>{}",
            para("Intro"),
            para("Cell A"),
            para("Cell B"),
            para("Outro"),
        );
        let text = extract(&docx_with_body(&body)).unwrap();
        assert_eq!(text, "Intro\nOutro\nCell A\nCell B\n");
    }

    #[test]
    fn test_runs_are_concatenated_and_entities_unescaped() {
        let body = r#"<w:p><w:r><w:t>Fish </w:t></w:r><w:r><w:t>&amp; chips</w:t></w:r></w:p>"#;
        let text = extract(&docx_with_body(body)).unwrap();
        assert_eq!(text, "Fish & chips\n");
    }

    #[test]
    fn test_missing_document_part_fails() {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            writer
                .start_file("other.xml", SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"<x/>").unwrap();
            writer.finish().unwrap();
        }
        let err = extract(&cursor.into_inner()).unwrap_err();
        assert!(matches!(
            err,
            Error::ExtractionFailed {
                format: FileType::Word,
                ..
            }
        ));
    }
}
