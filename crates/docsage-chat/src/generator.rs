//! Generation port.

use async_trait::async_trait;

use docsage_core::Result;

/// A chat-completion service: one system prompt, one user prompt, one answer.
///
/// Failures surface as `Error::GenerationFailed`.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f64,
        max_tokens: usize,
    ) -> Result<String>;
}
