//! Document registry reconstructed from chunk metadata.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{info, warn};

use docsage_core::{ChunkMetadata, Document, Error, Metadata, Result};
use docsage_store::VectorIndex;

/// One `Document` per distinct `doc_id`, in the order documents were first stored.
pub fn list_documents(index: &dyn VectorIndex) -> Result<Vec<Document>> {
    let records = index.get(&Metadata::new())?;

    let mut documents: Vec<Document> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (id, metadata) in records.ids.iter().zip(&records.metadatas) {
        let Some(meta) = ChunkMetadata::from_metadata(metadata) else {
            warn!("Skipping chunk {} with unreadable metadata", id);
            continue;
        };
        match positions.get(&meta.doc_id) {
            Some(&pos) => documents[pos].chunk_count += 1,
            None => {
                positions.insert(meta.doc_id.clone(), documents.len());
                documents.push(Document {
                    id: meta.doc_id,
                    filename: meta.filename,
                    file_type: meta.file_type,
                    upload_time: meta.upload_time,
                    chunk_count: 1,
                });
            }
        }
    }

    Ok(documents)
}

/// Remove every chunk of `doc_id` in one batched delete and return how many were removed.
pub fn delete_document(index: &dyn VectorIndex, doc_id: &str) -> Result<usize> {
    let mut filter = Metadata::new();
    filter.insert("doc_id".into(), Value::String(doc_id.to_string()));

    let records = index.get(&filter)?;
    if records.ids.is_empty() {
        return Err(Error::DocumentNotFound(doc_id.to_string()));
    }

    index.delete(&records.ids)?;
    info!("Deleted document {} ({} chunks)", doc_id, records.ids.len());
    Ok(records.ids.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsage_ingest::{Chunker, Ingester};
    use docsage_store::MemoryIndex;

    fn body(topic: &str, repeat: usize) -> Vec<u8> {
        format!("This paragraph talks about {} in some detail. ", topic)
            .repeat(repeat)
            .into_bytes()
    }

    #[test]
    fn test_list_groups_chunks_by_document() {
        let index = MemoryIndex::new();
        let ingester = Ingester::new(&index, Chunker::default());
        let a = ingester.ingest("rust.txt", &body("ownership", 60)).unwrap();
        let b = ingester.ingest("bread.md", &body("sourdough", 10)).unwrap();

        let docs = list_documents(&index).unwrap();
        assert_eq!(docs, vec![a.clone(), b.clone()]);
        let total: usize = docs.iter().map(|d| d.chunk_count).sum();
        assert_eq!(total, index.count().unwrap());
        assert_eq!(total, a.chunk_count + b.chunk_count);
    }

    #[test]
    fn test_list_skips_foreign_metadata() {
        let index = MemoryIndex::new();
        let mut stray = Metadata::new();
        stray.insert("note".into(), Value::String("not a chunk".into()));
        index
            .add(&["stray".into()], &["text".into()], &[stray])
            .unwrap();
        assert!(list_documents(&index).unwrap().is_empty());
    }

    #[test]
    fn test_delete_removes_only_that_document() {
        let index = MemoryIndex::new();
        let ingester = Ingester::new(&index, Chunker::default());
        let a = ingester.ingest("rust.txt", &body("ownership", 60)).unwrap();
        let b = ingester.ingest("bread.md", &body("sourdough", 10)).unwrap();

        let removed = delete_document(&index, &a.id).unwrap();
        assert_eq!(removed, a.chunk_count);
        assert_eq!(list_documents(&index).unwrap(), vec![b]);
    }

    #[test]
    fn test_delete_unknown_is_not_found_and_changes_nothing() {
        let index = MemoryIndex::new();
        let ingester = Ingester::new(&index, Chunker::default());
        ingester.ingest("rust.txt", &body("ownership", 60)).unwrap();
        let before = index.count().unwrap();

        let err = delete_document(&index, "never_ingested_00000000").unwrap_err();
        assert!(matches!(err, Error::DocumentNotFound(id) if id == "never_ingested_00000000"));
        assert_eq!(index.count().unwrap(), before);
    }
}
