//! DocSage Store: the vector index collaborator and its adapters.
//!
//! The ingestion and retrieval pipeline only sees the [`VectorIndex`] trait.
//! [`MemoryIndex`] backs tests and ephemeral runs; [`SqliteIndex`] persists
//! chunks to a single SQLite file.

pub mod index;
pub mod memory;
pub mod schema;
pub mod sqlite;
pub mod vectorize;

pub use index::{IndexMatch, IndexRecords, VectorIndex};
pub use memory::MemoryIndex;
pub use sqlite::SqliteIndex;
pub use vectorize::{HashedTermVectorizer, Vectorizer};
