//! DocSage Core: data model, error taxonomy, configuration.

pub mod config;
pub mod error;
pub mod types;

pub use config::{DataPaths, DocSageConfig, IndexBackend};
pub use error::{Error, Result};
pub use types::*;
