//! Shared application state.

use std::sync::Arc;

use docsage_chat::Generator;
use docsage_core::{DocSageConfig, Result};
use docsage_ingest::Chunker;
use docsage_store::VectorIndex;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: DocSageConfig,
    pub index: Arc<dyn VectorIndex>,
    /// `None` when no provider credential is configured.
    pub generator: Option<Arc<dyn Generator>>,
    pub chunker: Chunker,
}

impl AppState {
    /// Fails with `InvalidChunkConfig` if the configured chunk parameters are unusable.
    pub fn new(
        config: DocSageConfig,
        index: Arc<dyn VectorIndex>,
        generator: Option<Arc<dyn Generator>>,
    ) -> Result<Self> {
        let chunker = Chunker::new(config.chunk_size, config.chunk_overlap)?;
        Ok(Self {
            config,
            index,
            generator,
            chunker,
        })
    }

    pub fn generation_configured(&self) -> bool {
        self.generator.is_some()
    }
}
