//! DocSage: document upload and retrieval-augmented Q&A server.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use docsage_chat::{Generator, LLMConfig, ProviderClient};
use docsage_core::{DocSageConfig, IndexBackend};
use docsage_server::{build_router, AppState};
use docsage_store::{MemoryIndex, SqliteIndex, VectorIndex};

fn resolve_data_dir() -> PathBuf {
    std::env::var("DOCSAGE_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

fn print_help() {
    println!("DocSage: document Q&A over your own files");
    println!();
    println!("Usage: docsage [command]");
    println!();
    println!("Commands:");
    println!("  (none)   Start the server");
    println!("  help     Show this help message");
    println!();
    println!("Environment:");
    println!("  DOCSAGE_DATA_DIR       Data directory (default ./data)");
    println!("  DOCSAGE_HOST / PORT    Bind address (default 0.0.0.0:8000)");
    println!("  DOCSAGE_INDEX          sqlite | memory (default sqlite)");
    println!("  DOCSAGE_CHUNK_SIZE     Chunk window in characters (default 1000)");
    println!("  DOCSAGE_CHUNK_OVERLAP  Overlap in characters (default 200)");
    println!("  DOCSAGE_TOP_K          Chunks retrieved per query (default 3)");
    println!("  DOCSAGE_MAX_UPLOAD_MB  Upload size limit (default 50)");
    println!("  OPENAI_API_KEY, ANTHROPIC_API_KEY, GROQ_API_KEY");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        match args[1].as_str() {
            "--help" | "-h" | "help" => {
                print_help();
                return Ok(());
            }
            other => {
                eprintln!("Unknown command: {}. Use 'docsage help' for usage.", other);
                std::process::exit(1);
            }
        }
    }

    // Configuration
    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());
    let config = DocSageConfig::from_env(&data_dir)?;

    // Index
    let index: Arc<dyn VectorIndex> = match config.index_backend {
        IndexBackend::Sqlite => Arc::new(
            SqliteIndex::open(&config.data_paths.index)
                .map_err(|e| anyhow::anyhow!("Failed to open index: {}", e))?,
        ),
        IndexBackend::Memory => {
            warn!("Using in-memory index; documents are lost on restart");
            Arc::new(MemoryIndex::new())
        }
    };

    // Generator
    let llm_config = LLMConfig::load(&config.data_paths.llm_config_file);
    let generator: Option<Arc<dyn Generator>> = match llm_config.resolve_provider() {
        Some(selection) => Some(Arc::new(ProviderClient::new(selection)?)),
        None => None,
    };

    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(
        AppState::new(config, index, generator)
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?,
    );
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("DocSage server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
