//! Retrieval assembler: similarity search → numbered context → generated answer.

use std::time::Instant;

use tracing::info;

use docsage_chat::prompts::{
    build_context, build_user_prompt, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, SYSTEM_PROMPT,
};
use docsage_chat::Generator;
use docsage_core::{FileType, QueryResult, Result, Source};
use docsage_store::VectorIndex;

pub const NO_RESULTS_ANSWER: &str =
    "I couldn't find any relevant information in the uploaded documents.";

const SNIPPET_CHARS: usize = 200;
const CONFIDENCE_SCALE: f64 = 1.2;

/// Answer `question` from the `top_k` nearest chunks.
///
/// An empty search result is a normal answer with no sources and zero
/// confidence; the generator is not called in that case.
pub async fn retrieve(
    index: &dyn VectorIndex,
    generator: &dyn Generator,
    question: &str,
    top_k: usize,
) -> Result<QueryResult> {
    let started = Instant::now();
    info!("Searching for: {}", question);

    let matches = index.query(question, top_k)?;
    if matches.is_empty() {
        return Ok(QueryResult {
            answer: NO_RESULTS_ANSWER.to_string(),
            sources: Vec::new(),
            confidence: 0.0,
            latency_ms: elapsed_ms(started),
        });
    }

    let sources: Vec<Source> = matches
        .iter()
        .map(|m| Source {
            snippet: snippet(&m.text),
            filename: m
                .metadata
                .get("filename")
                .and_then(|v| v.as_str())
                .unwrap_or("Unknown")
                .to_string(),
            file_type: m
                .metadata
                .get("file_type")
                .and_then(|v| v.as_str())
                .and_then(FileType::from_label),
            relevance: 1.0 - m.distance,
        })
        .collect();

    let context = build_context(
        sources
            .iter()
            .zip(&matches)
            .map(|(s, m)| (s.filename.as_str(), m.text.as_str())),
    );
    let user_prompt = build_user_prompt(&context, question);

    let answer = generator
        .complete(SYSTEM_PROMPT, &user_prompt, DEFAULT_TEMPERATURE, DEFAULT_MAX_TOKENS)
        .await?;

    let relevances: Vec<f64> = sources.iter().map(|s| s.relevance).collect();
    let latency_ms = elapsed_ms(started);
    info!("Query completed in {:.2}ms", latency_ms);

    Ok(QueryResult {
        answer,
        confidence: confidence(&relevances),
        sources,
        latency_ms,
    })
}

/// Chunk text cut to 200 characters, with `...` appended when cut.
pub fn snippet(text: &str) -> String {
    if text.chars().count() > SNIPPET_CHARS {
        let cut: String = text.chars().take(SNIPPET_CHARS).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

/// Mean relevance scaled by 1.2 and clamped to `[0, 1]`.
///
/// This is a calibration heuristic, not a probability: it carries no
/// statistical guarantee about answer correctness.
pub fn confidence(relevances: &[f64]) -> f64 {
    if relevances.is_empty() {
        return 0.0;
    }
    let avg = relevances.iter().sum::<f64>() / relevances.len() as f64;
    (avg * CONFIDENCE_SCALE).clamp(0.0, 1.0)
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
