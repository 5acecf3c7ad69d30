//! In-memory index for tests and ephemeral runs.

use std::sync::Arc;

use ndarray::Array1;
use parking_lot::RwLock;
use tracing::debug;

use crate::index::{check_batch, matches_filter, IndexMatch, IndexRecords, VectorIndex};
use crate::vectorize::{cosine_distance, HashedTermVectorizer, Vectorizer};
use docsage_core::{Metadata, Result};

struct StoredChunk {
    id: String,
    text: String,
    metadata: Metadata,
    vector: Array1<f32>,
}

/// Brute-force index holding every chunk in insertion order.
pub struct MemoryIndex {
    chunks: RwLock<Vec<StoredChunk>>,
    vectorizer: Arc<dyn Vectorizer>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::with_vectorizer(Arc::new(HashedTermVectorizer::default()))
    }

    pub fn with_vectorizer(vectorizer: Arc<dyn Vectorizer>) -> Self {
        Self {
            chunks: RwLock::new(Vec::new()),
            vectorizer,
        }
    }
}

impl Default for MemoryIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorIndex for MemoryIndex {
    fn add(&self, ids: &[String], texts: &[String], metadatas: &[Metadata]) -> Result<()> {
        check_batch(ids, texts, metadatas)?;

        let mut chunks = self.chunks.write();
        for ((id, text), metadata) in ids.iter().zip(texts).zip(metadatas) {
            let stored = StoredChunk {
                id: id.clone(),
                text: text.clone(),
                metadata: metadata.clone(),
                vector: self.vectorizer.vectorize(text),
            };
            match chunks.iter().position(|c| &c.id == id) {
                Some(pos) => chunks[pos] = stored,
                None => chunks.push(stored),
            }
        }
        debug!("MemoryIndex: added {} chunks ({} total)", ids.len(), chunks.len());
        Ok(())
    }

    fn query(&self, text: &str, top_k: usize) -> Result<Vec<IndexMatch>> {
        let q = self.vectorizer.vectorize(text);
        let chunks = self.chunks.read();

        let mut scored: Vec<(f64, &StoredChunk)> = chunks
            .iter()
            .map(|c| (cosine_distance(&q, &c.vector), c))
            .collect();
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));

        Ok(scored
            .into_iter()
            .take(top_k)
            .map(|(distance, c)| IndexMatch {
                id: c.id.clone(),
                text: c.text.clone(),
                metadata: c.metadata.clone(),
                distance,
            })
            .collect())
    }

    fn get(&self, filter: &Metadata) -> Result<IndexRecords> {
        let chunks = self.chunks.read();
        let mut records = IndexRecords::default();
        for c in chunks.iter().filter(|c| matches_filter(&c.metadata, filter)) {
            records.ids.push(c.id.clone());
            records.metadatas.push(c.metadata.clone());
        }
        Ok(records)
    }

    fn delete(&self, ids: &[String]) -> Result<()> {
        let mut chunks = self.chunks.write();
        chunks.retain(|c| !ids.contains(&c.id));
        Ok(())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.chunks.read().len())
    }
}
