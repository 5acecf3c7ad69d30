//! The vector index port.

use docsage_core::{Error, Metadata, Result};

/// One nearest-neighbour hit. Lower `distance` means more similar (cosine space).
#[derive(Debug, Clone, PartialEq)]
pub struct IndexMatch {
    pub id: String,
    pub text: String,
    pub metadata: Metadata,
    pub distance: f64,
}

/// Ids and metadata of stored chunks, in storage order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexRecords {
    pub ids: Vec<String>,
    pub metadatas: Vec<Metadata>,
}

/// External vector-similarity index.
///
/// Every call is a single atomic request/response. `add` treats a repeated id
/// as an upsert, so re-ingesting identical content overwrites in place.
pub trait VectorIndex: Send + Sync {
    /// Store a batch of chunks. All three slices must have equal length.
    fn add(&self, ids: &[String], texts: &[String], metadatas: &[Metadata]) -> Result<()>;

    /// Return up to `top_k` stored chunks ordered by ascending distance to `text`.
    fn query(&self, text: &str, top_k: usize) -> Result<Vec<IndexMatch>>;

    /// Return every chunk whose metadata equals `filter` on all of its keys.
    /// An empty filter matches everything.
    fn get(&self, filter: &Metadata) -> Result<IndexRecords>;

    /// Remove the given ids. Unknown ids are ignored.
    fn delete(&self, ids: &[String]) -> Result<()>;

    /// Number of stored chunks.
    fn count(&self) -> Result<usize> {
        Ok(self.get(&Metadata::new())?.ids.len())
    }
}

/// Equality match of every filter key against the metadata.
pub fn matches_filter(metadata: &Metadata, filter: &Metadata) -> bool {
    filter
        .iter()
        .all(|(key, value)| metadata.get(key) == Some(value))
}

pub(crate) fn check_batch(ids: &[String], texts: &[String], metadatas: &[Metadata]) -> Result<()> {
    if ids.len() != texts.len() || ids.len() != metadatas.len() {
        return Err(Error::Internal(format!(
            "Mismatched batch: {} ids, {} texts, {} metadatas",
            ids.len(),
            texts.len(),
            metadatas.len()
        )));
    }
    Ok(())
}
