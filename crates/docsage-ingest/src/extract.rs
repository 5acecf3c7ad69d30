//! Extraction router: raw bytes + filename → plain text.
//!
//! The format is resolved from the file extension against the fixed
//! registry in [`docsage_core::SUPPORTED_EXTENSIONS`], then dispatched to the
//! matching adapter. Adapters never return an empty string on malformed
//! input; they fail with a typed error naming their format.

pub mod delimited;
pub mod docx;
pub mod html;
pub mod markdown;
pub mod pdf;
pub mod spreadsheet;
pub mod text;

use docsage_core::{extension_of, Error, FileType, Result};
use tracing::{debug, error};

/// Resolve a filename to its format, or fail naming the rejected extension.
pub fn resolve_format(filename: &str) -> Result<FileType> {
    FileType::from_filename(filename).ok_or_else(|| Error::UnsupportedFormat {
        extension: extension_of(filename),
        supported: FileType::supported_list(),
    })
}

/// Run the adapter for `format` over `content`.
pub fn extract_as(format: FileType, content: &[u8]) -> Result<String> {
    match format {
        FileType::Pdf => pdf::extract(content),
        FileType::Word => docx::extract(content),
        FileType::Text => text::extract(content),
        FileType::Markdown => markdown::extract(content),
        FileType::Html => html::extract(content),
        FileType::Csv => delimited::extract(content),
        FileType::Spreadsheet => spreadsheet::extract(content),
    }
}

/// Extract the text of an uploaded file.
///
/// Fails with `UnsupportedFormat` for unknown extensions and with
/// `EmptyDocument` when the extracted text is blank.
pub fn extract_text(content: &[u8], filename: &str) -> Result<String> {
    let format = resolve_format(filename)?;

    let text = extract_as(format, content).map_err(|e| {
        error!("Error extracting {} text from {}: {}", format, filename, e);
        e
    })?;

    if text.trim().is_empty() {
        return Err(Error::EmptyDocument {
            filename: filename.to_string(),
        });
    }

    debug!("Extracted {} chars from {}", text.chars().count(), filename);
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension_names_it() {
        let err = extract_text(b"hello", "malware.EXE").unwrap_err();
        match err {
            Error::UnsupportedFormat {
                extension,
                supported,
            } => {
                assert_eq!(extension, ".exe");
                assert!(supported.contains(".pdf"));
                assert!(supported.contains(".xls"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_extension_is_unsupported() {
        assert!(matches!(
            resolve_format("README"),
            Err(Error::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let text = extract_text(b"Some plain text content", "NOTES.TXT").unwrap();
        assert_eq!(text, "Some plain text content");
    }

    #[test]
    fn test_whitespace_only_is_empty_document() {
        let err = extract_text(b"  \n\t \n", "blank.txt").unwrap_err();
        assert!(matches!(err, Error::EmptyDocument { .. }));
    }

    #[test]
    fn test_html_script_is_dropped() {
        let text = extract_text(b"<script>alert(1)</script><p>Hello</p>", "page.html").unwrap();
        assert!(text.contains("Hello"));
        assert!(!text.contains("alert(1)"));
    }

    #[test]
    fn test_adapter_failure_carries_format() {
        let err = extract_text(b"not a zip archive", "report.docx").unwrap_err();
        assert!(matches!(
            err,
            Error::ExtractionFailed {
                format: FileType::Word,
                ..
            }
        ));
    }
}
