//! Document routes: upload, list, delete.

use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;
use docsage_core::{Document, Error};
use docsage_ingest::Ingester;
use docsage_resolve::{delete_document, list_documents};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/upload", post(upload))
        .route("/documents", get(list))
        .route("/documents/{doc_id}", delete(remove))
}

/// POST /upload: ingest one multipart file.
async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<Document>, ApiError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {}", e)))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {}", e)))?;
        upload = Some((filename, bytes));
        break;
    }
    let (filename, bytes) = upload.ok_or_else(|| ApiError::bad_request("No file provided"))?;
    info!("Upload received: {} ({} bytes)", filename, bytes.len());

    // Extraction and chunking are CPU-bound.
    let worker_state = state.clone();
    let doc = tokio::task::spawn_blocking(move || {
        Ingester::new(worker_state.index.as_ref(), worker_state.chunker).ingest(&filename, &bytes)
    })
    .await
    .map_err(|e| Error::Internal(format!("ingest task failed: {}", e)))
    .and_then(|r| r)
    .map_err(|e| ApiError::from_core(e, "Failed to process document"))?;

    Ok(Json(doc))
}

/// GET /documents: one entry per ingested document.
async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Document>>, ApiError> {
    list_documents(state.index.as_ref())
        .map(Json)
        .map_err(|e| ApiError::from_core(e, "Failed to list documents"))
}

/// DELETE /documents/{doc_id}: remove a document and all of its chunks.
async fn remove(
    State(state): State<Arc<AppState>>,
    Path(doc_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let removed = delete_document(state.index.as_ref(), &doc_id)
        .map_err(|e| ApiError::from_core(e, "Failed to delete document"))?;

    Ok(Json(json!({
        "message": format!("Deleted document {} and {} chunks", doc_id, removed),
        "deleted_chunks": removed,
    })))
}
