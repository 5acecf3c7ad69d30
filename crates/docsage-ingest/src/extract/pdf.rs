//! PDF adapter.

use std::panic::{catch_unwind, AssertUnwindSafe};

use docsage_core::{Error, FileType, Result};

/// Page texts in document order, each followed by a newline.
pub fn extract(bytes: &[u8]) -> Result<String> {
    // pdf-extract panics on some malformed inputs instead of returning an error.
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }));
    match outcome {
        Ok(Ok(pages)) => Ok(pages.iter().map(|page| format!("{}\n", page)).collect()),
        Ok(Err(e)) => Err(Error::extraction(FileType::Pdf, e)),
        Err(_) => Err(Error::extraction(FileType::Pdf, "parser aborted on malformed input")),
    }
}
