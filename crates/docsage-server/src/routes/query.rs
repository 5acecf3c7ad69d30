//! Retrieval-augmented question answering.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;
use docsage_core::{Error, QueryResult};
use docsage_resolve::retrieve;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/query", post(query))
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub question: String,
    /// Falls back to the configured default (3).
    #[serde(default)]
    pub top_k: Option<usize>,
}

/// POST /query: answer a question from the indexed documents.
async fn query(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<QueryResult>, ApiError> {
    const CONTEXT: &str = "Failed to query documents";

    let Some(generator) = state.generator.clone() else {
        return Err(ApiError::from_core(
            Error::ConfigurationMissing(
                "No LLM API key configured. Set OPENAI_API_KEY environment variable.".into(),
            ),
            CONTEXT,
        ));
    };
    if req.question.trim().is_empty() {
        return Err(ApiError::bad_request("Question must not be empty"));
    }

    let top_k = req.top_k.unwrap_or(state.config.default_top_k);
    retrieve(state.index.as_ref(), generator.as_ref(), &req.question, top_k)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_core(e, CONTEXT))
}
