//! Answer generation for retrieval-augmented queries.
//!
//! The retrieval layer only sees the [`Generator`] port. Concrete bindings
//! call external chat-completion APIs; no local model is required.

pub mod config;
pub mod generator;
pub mod prompts;
pub mod providers;
pub mod types;

pub use config::LLMConfig;
pub use generator::Generator;
pub use providers::ProviderClient;
pub use types::*;
