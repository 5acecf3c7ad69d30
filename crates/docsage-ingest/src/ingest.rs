//! Ingestion pipeline: upload bytes → text → chunks → one index write.

use std::time::Instant;

use chrono::Utc;
use tracing::info;

use crate::chunking::Chunker;
use crate::extract::{extract_text, resolve_format};
use crate::identity::identify;
use docsage_core::{Chunk, ChunkMetadata, Document, Error, Metadata, Result};
use docsage_store::VectorIndex;

/// Turns uploads into indexed chunks.
pub struct Ingester<'a> {
    index: &'a dyn VectorIndex,
    chunker: Chunker,
}

impl<'a> Ingester<'a> {
    pub fn new(index: &'a dyn VectorIndex, chunker: Chunker) -> Self {
        Self { index, chunker }
    }

    /// Ingest one upload.
    ///
    /// Every failure happens before the index is touched, so a rejected
    /// upload leaves no chunks behind. Re-ingesting identical bytes yields
    /// the same id and storage keys and overwrites the earlier chunks.
    pub fn ingest(&self, filename: &str, content: &[u8]) -> Result<Document> {
        let started = Instant::now();
        let file_type = resolve_format(filename)?;
        let doc_id = identify(filename, content);

        info!("Extracting text from {} ({})", filename, file_type);
        let text = extract_text(content, filename)?;

        let pieces = self.chunker.chunk(&text)?;
        if pieces.is_empty() {
            return Err(Error::EmptyDocument {
                filename: filename.to_string(),
            });
        }

        let upload_time = Utc::now();
        let total = pieces.len();
        let chunks: Vec<Chunk> = pieces
            .into_iter()
            .enumerate()
            .map(|(i, text)| Chunk::new(&doc_id, i, total, text))
            .collect();

        let ids: Vec<String> = chunks.iter().map(|c| c.storage_key.clone()).collect();
        let metadatas: Vec<Metadata> = chunks
            .iter()
            .map(|c| {
                ChunkMetadata {
                    filename: filename.to_string(),
                    file_type,
                    doc_id: doc_id.clone(),
                    chunk_index: c.index,
                    total_chunks: total,
                    upload_time,
                }
                .to_metadata()
            })
            .collect();
        let texts: Vec<String> = chunks.into_iter().map(|c| c.text).collect();

        self.index.add(&ids, &texts, &metadatas)?;

        info!(
            "Ingested {} as {} in {} chunks ({}ms)",
            filename,
            doc_id,
            total,
            started.elapsed().as_millis()
        );

        Ok(Document {
            id: doc_id,
            filename: filename.to_string(),
            file_type,
            upload_time,
            chunk_count: total,
        })
    }
}
