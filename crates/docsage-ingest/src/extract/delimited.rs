//! CSV adapter: one line per row, fields joined with `" | "`.

use super::text::decode_utf8;
use docsage_core::{Error, FileType, Result};

const FIELD_SEPARATOR: &str = " | ";

pub fn extract(bytes: &[u8]) -> Result<String> {
    let source = decode_utf8(bytes, FileType::Csv)?;
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::extraction(FileType::Csv, e))?;
        rows.push(record.iter().collect::<Vec<_>>().join(FIELD_SEPARATOR));
    }
    Ok(rows.join("\n"))
}
