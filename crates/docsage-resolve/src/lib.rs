//! DocSage Resolve: answering questions from the index and listing what it holds.

pub mod registry;
pub mod retrieval;

pub use registry::{delete_document, list_documents};
pub use retrieval::{confidence, retrieve, snippet, NO_RESULTS_ANSWER};
