//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Paths to all DocSage data directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Persistent index directory (`data/index/`).
    pub index: PathBuf,
    /// LLM configuration (`data/llm-config.json`).
    pub llm_config_file: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            index: root.join("index"),
            llm_config_file: root.join("llm-config.json"),
            root,
        };
        std::fs::create_dir_all(&paths.index)?;
        Ok(paths)
    }
}

/// Which vector index adapter backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexBackend {
    /// SQLite file under `data/index/`.
    Sqlite,
    /// Process-local, lost on restart.
    Memory,
}

impl IndexBackend {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Some(Self::Sqlite),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Top-level DocSage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocSageConfig {
    /// HTTP bind host.
    pub host: String,
    /// HTTP server port.
    pub port: u16,
    /// Data directory paths.
    pub data_paths: DataPaths,
    pub index_backend: IndexBackend,
    /// Chunk window size in characters.
    pub chunk_size: usize,
    /// Characters shared between consecutive chunk windows.
    pub chunk_overlap: usize,
    /// Default number of chunks retrieved per query.
    pub default_top_k: usize,
    /// Maximum accepted upload size in bytes.
    pub max_upload_bytes: usize,
}

impl DocSageConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let index_backend = match std::env::var("DOCSAGE_INDEX") {
            Ok(v) => IndexBackend::parse(&v).unwrap_or_else(|| {
                tracing::warn!("Unknown DOCSAGE_INDEX '{}', using sqlite", v);
                IndexBackend::Sqlite
            }),
            Err(_) => IndexBackend::Sqlite,
        };

        Ok(Self {
            host: std::env::var("DOCSAGE_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_or("PORT", 8000),
            data_paths: DataPaths::new(data_dir)?,
            index_backend,
            chunk_size: env_or("DOCSAGE_CHUNK_SIZE", 1000),
            chunk_overlap: env_or("DOCSAGE_CHUNK_OVERLAP", 200),
            default_top_k: env_or("DOCSAGE_TOP_K", 3),
            max_upload_bytes: env_or::<usize>("DOCSAGE_MAX_UPLOAD_MB", 50) * 1024 * 1024,
        })
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_paths_creates_index_dir() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::new(dir.path().join("data")).unwrap();
        assert!(paths.index.is_dir());
        assert_eq!(paths.llm_config_file, dir.path().join("data/llm-config.json"));
    }

    #[test]
    fn test_index_backend_parse() {
        assert_eq!(IndexBackend::parse("Memory"), Some(IndexBackend::Memory));
        assert_eq!(IndexBackend::parse(" sqlite "), Some(IndexBackend::Sqlite));
        assert_eq!(IndexBackend::parse("chroma"), None);
    }
}
