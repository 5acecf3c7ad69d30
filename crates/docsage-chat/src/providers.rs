//! External LLM provider bindings.
//!
//! OpenAI and Groq share the chat-completions format. Anthropic uses the
//! Messages API with the system prompt as a top-level field.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::generator::Generator;
use crate::types::{ChatMessage, LLMProvider, ProviderSelection};
use docsage_core::{Error, Result};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// [`Generator`] backed by a hosted chat-completion API.
#[derive(Clone)]
pub struct ProviderClient {
    client: Client,
    selection: ProviderSelection,
}

impl ProviderClient {
    pub fn new(selection: ProviderSelection) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Internal(format!("HTTP client init failed: {}", e)))?;
        Ok(Self { client, selection })
    }

    pub fn provider(&self) -> LLMProvider {
        self.selection.provider
    }

    pub fn model(&self) -> &str {
        &self.selection.model
    }
}

#[async_trait]
impl Generator for ProviderClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f64,
        max_tokens: usize,
    ) -> Result<String> {
        let messages = [ChatMessage::system(system_prompt), ChatMessage::user(user_prompt)];
        let provider = self.selection.provider;
        let model = &self.selection.model;
        let key = &self.selection.api_key;

        let request = match provider {
            LLMProvider::OpenAI | LLMProvider::Groq => self
                .client
                .post(provider.endpoint())
                .header("Authorization", format!("Bearer {}", key))
                .json(&openai_compat_body(model, &messages, temperature, max_tokens)),
            LLMProvider::Anthropic => self
                .client
                .post(provider.endpoint())
                .header("x-api-key", key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&anthropic_body(model, &messages, temperature, max_tokens)),
        };

        debug!("Requesting completion from {} with model {}", provider, model);
        let response = request
            .send()
            .await
            .map_err(|e| Error::GenerationFailed(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("{} returned {}: {}", provider, status, body);
            return Err(Error::GenerationFailed(format!(
                "API error {}: {}",
                status, body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::GenerationFailed(format!("Invalid response body: {}", e)))?;

        match provider {
            LLMProvider::OpenAI | LLMProvider::Groq => parse_openai_compat(&body),
            LLMProvider::Anthropic => parse_anthropic(&body),
        }
    }
}

/// Request body for OpenAI-compatible APIs (OpenAI, Groq).
pub fn openai_compat_body(
    model: &str,
    messages: &[ChatMessage],
    temperature: f64,
    max_tokens: usize,
) -> Value {
    json!({
        "model": model,
        "messages": messages,
        "temperature": temperature,
        "max_tokens": max_tokens,
    })
}

/// Request body for Anthropic's Messages API.
pub fn anthropic_body(
    model: &str,
    messages: &[ChatMessage],
    temperature: f64,
    max_tokens: usize,
) -> Value {
    let conversation: Vec<&ChatMessage> = messages.iter().filter(|m| m.role != "system").collect();
    let mut body = json!({
        "model": model,
        "messages": conversation,
        "temperature": temperature,
        "max_tokens": max_tokens,
    });
    if let Some(system) = messages.iter().find(|m| m.role == "system") {
        body["system"] = json!(system.content);
    }
    body
}

pub fn parse_openai_compat(body: &Value) -> Result<String> {
    body["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::GenerationFailed("Response contained no message content".into()))
}

pub fn parse_anthropic(body: &Value) -> Result<String> {
    let blocks = body["content"]
        .as_array()
        .ok_or_else(|| Error::GenerationFailed("Response contained no content blocks".into()))?;
    Ok(blocks
        .iter()
        .filter(|b| b["type"] == "text")
        .filter_map(|b| b["text"].as_str())
        .collect::<Vec<_>>()
        .join(""))
}
