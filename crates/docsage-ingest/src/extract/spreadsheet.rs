//! Excel (.xlsx/.xls) adapter.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Reader};

use docsage_core::{Error, FileType, Result};

const COLUMN_GAP: &str = "  ";

pub fn extract(bytes: &[u8]) -> Result<String> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| Error::extraction(FileType::Spreadsheet, e))?;

    let mut out = String::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| Error::extraction(FileType::Spreadsheet, e))?;
        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();

        out.push_str(&format!("\n=== Sheet: {} ===\n", name));
        out.push_str(&render_table(&rows));
        out.push('\n');
    }
    Ok(out)
}

/// Left-aligned text table; each column is padded to its widest cell.
pub fn render_table(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    rows.iter()
        .map(|row| {
            let line = row
                .iter()
                .enumerate()
                .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
                .collect::<Vec<_>>()
                .join(COLUMN_GAP);
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
