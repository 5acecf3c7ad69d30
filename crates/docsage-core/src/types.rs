//! Data types for documents, chunks, and query results.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-chunk metadata map as exchanged with the vector index.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Supported document formats. The serialized form is the human-readable label
/// stored in chunk metadata and returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileType {
    #[serde(rename = "PDF Document")]
    Pdf,
    #[serde(rename = "Word Document")]
    Word,
    #[serde(rename = "Text File")]
    Text,
    #[serde(rename = "Markdown File")]
    Markdown,
    #[serde(rename = "HTML File")]
    Html,
    #[serde(rename = "CSV File")]
    Csv,
    #[serde(rename = "Excel Spreadsheet")]
    Spreadsheet,
}

/// Extension registry, in the order formats are advertised.
pub const SUPPORTED_EXTENSIONS: &[(&str, FileType)] = &[
    (".pdf", FileType::Pdf),
    (".docx", FileType::Word),
    (".txt", FileType::Text),
    (".md", FileType::Markdown),
    (".html", FileType::Html),
    (".htm", FileType::Html),
    (".csv", FileType::Csv),
    (".xlsx", FileType::Spreadsheet),
    (".xls", FileType::Spreadsheet),
];

impl FileType {
    /// Look up a format by extension, with or without the leading dot. Case-insensitive.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_lowercase();
        SUPPORTED_EXTENSIONS
            .iter()
            .find(|(e, _)| e[1..] == ext)
            .map(|(_, ft)| *ft)
    }

    /// Resolve the format of a filename from its final extension.
    pub fn from_filename(filename: &str) -> Option<Self> {
        Self::from_extension(&extension_of(filename))
    }

    /// Parse a stored label back into a format.
    pub fn from_label(label: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(label.to_string())).ok()
    }

    /// Human-readable description, e.g. "PDF Document".
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF Document",
            Self::Word => "Word Document",
            Self::Text => "Text File",
            Self::Markdown => "Markdown File",
            Self::Html => "HTML File",
            Self::Csv => "CSV File",
            Self::Spreadsheet => "Excel Spreadsheet",
        }
    }

    /// Comma-separated list of every supported extension.
    pub fn supported_list() -> String {
        SUPPORTED_EXTENSIONS
            .iter()
            .map(|(e, _)| *e)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pdf => write!(f, "PDF"),
            Self::Word => write!(f, "DOCX"),
            Self::Text => write!(f, "TXT"),
            Self::Markdown => write!(f, "Markdown"),
            Self::Html => write!(f, "HTML"),
            Self::Csv => write!(f, "CSV"),
            Self::Spreadsheet => write!(f, "Excel"),
        }
    }
}

/// Lowercased final extension including the dot (`".pdf"`), or empty if none.
pub fn extension_of(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}

/// Document-level record reconstructed from its chunks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub filename: String,
    pub file_type: FileType,
    pub upload_time: DateTime<Utc>,
    pub chunk_count: usize,
}

/// A retrievable unit of a document's extracted text.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub text: String,
    pub index: usize,
    pub total_chunks: usize,
    pub doc_id: String,
    pub storage_key: String,
}

impl Chunk {
    pub fn new(doc_id: &str, index: usize, total_chunks: usize, text: String) -> Self {
        Self {
            storage_key: storage_key(doc_id, index),
            text,
            index,
            total_chunks,
            doc_id: doc_id.to_string(),
        }
    }
}

/// Primary key of a chunk in the vector index.
pub fn storage_key(doc_id: &str, index: usize) -> String {
    format!("{}_chunk_{}", doc_id, index)
}

/// Metadata written alongside every chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub filename: String,
    pub file_type: FileType,
    pub doc_id: String,
    pub chunk_index: usize,
    pub total_chunks: usize,
    pub upload_time: DateTime<Utc>,
}

impl ChunkMetadata {
    pub fn to_metadata(&self) -> Metadata {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => Metadata::new(),
        }
    }

    /// Parse stored metadata. Returns None if any field is missing or malformed.
    pub fn from_metadata(meta: &Metadata) -> Option<Self> {
        serde_json::from_value(serde_json::Value::Object(meta.clone())).ok()
    }
}

/// A retrieved passage cited in a query answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub snippet: String,
    pub filename: String,
    pub file_type: Option<FileType>,
    pub relevance: f64,
}

/// Answer to a natural-language question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub answer: String,
    pub sources: Vec<Source>,
    pub confidence: f64,
    pub latency_ms: f64,
}
