//! Error types for DocSage.

use thiserror::Error;

use crate::types::FileType;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported file type: {extension}. Supported types: {supported}")]
    UnsupportedFormat { extension: String, supported: String },

    #[error("Failed to extract text from {format}: {cause}")]
    ExtractionFailed { format: FileType, cause: String },

    #[error("Could not decode {format} file: {cause}")]
    DecodeError { format: FileType, cause: String },

    #[error("No text found in file: {filename}")]
    EmptyDocument { filename: String },

    #[error("Invalid chunk configuration: size={size}, overlap={overlap}")]
    InvalidChunkConfig { size: usize, overlap: usize },

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Index unavailable: {0}")]
    IndexUnavailable(String),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Wrap an adapter failure with the format it was decoding.
    pub fn extraction(format: FileType, cause: impl std::fmt::Display) -> Self {
        Self::ExtractionFailed {
            format,
            cause: cause.to_string(),
        }
    }

    /// Whether this error was caused by the uploaded content rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat { .. }
                | Self::ExtractionFailed { .. }
                | Self::DecodeError { .. }
                | Self::EmptyDocument { .. }
                | Self::InvalidChunkConfig { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
