//! Informational endpoints: service banner, health, format registry.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;
use docsage_core::SUPPORTED_EXTENSIONS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/supported-formats", get(supported_formats))
}

fn extension_list() -> Vec<&'static str> {
    SUPPORTED_EXTENSIONS.iter().map(|(ext, _)| *ext).collect()
}

/// GET /: service banner.
async fn root() -> Json<Value> {
    Json(json!({
        "message": "DocSage document Q&A API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "operational",
        "supported_formats": extension_list(),
    }))
}

/// GET /health: liveness plus index and credential status.
async fn health(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let documents_count = state
        .index
        .count()
        .map_err(|e| ApiError::from_core(e, "Failed to read index"))?;

    Ok(Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "openai_configured": state.generation_configured(),
        "documents_count": documents_count,
        "supported_formats": extension_list(),
    })))
}

/// GET /supported-formats: extension registry with human-readable labels.
async fn supported_formats() -> Json<Value> {
    let formats: Vec<Value> = SUPPORTED_EXTENSIONS
        .iter()
        .map(|(ext, file_type)| json!({"extension": ext, "description": file_type.label()}))
        .collect();
    Json(json!({ "formats": formats }))
}
