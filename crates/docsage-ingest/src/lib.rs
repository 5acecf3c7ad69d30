//! DocSage Ingest: format extraction, chunking, document identity, ingestion.

pub mod chunking;
pub mod extract;
pub mod identity;
pub mod ingest;

pub use chunking::{ChunkWindow, Chunker};
pub use extract::{extract_text, resolve_format};
pub use identity::identify;
pub use ingest::Ingester;
