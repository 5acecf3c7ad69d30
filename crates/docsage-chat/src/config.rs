//! LLM configuration loading and provider selection.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::types::{LLMProvider, ProviderSelection};

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-haiku-20241022";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// Stored LLM configuration (`llm-config.json`). Every field is optional on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LLMConfig {
    #[serde(default = "default_preferred")]
    pub preferred_provider: String,
    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default)]
    pub anthropic_api_key: Option<String>,
    #[serde(default)]
    pub groq_api_key: Option<String>,
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    #[serde(default = "default_anthropic_model")]
    pub anthropic_model: String,
    #[serde(default = "default_groq_model")]
    pub groq_model: String,
}

fn default_preferred() -> String {
    "auto".into()
}
fn default_openai_model() -> String {
    DEFAULT_OPENAI_MODEL.into()
}
fn default_anthropic_model() -> String {
    DEFAULT_ANTHROPIC_MODEL.into()
}
fn default_groq_model() -> String {
    DEFAULT_GROQ_MODEL.into()
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            preferred_provider: default_preferred(),
            openai_api_key: None,
            anthropic_api_key: None,
            groq_api_key: None,
            openai_model: default_openai_model(),
            anthropic_model: default_anthropic_model(),
            groq_model: default_groq_model(),
        }
    }
}

impl LLMConfig {
    /// Load config from file, falling back to env vars and defaults.
    pub fn load(config_path: &Path) -> Self {
        Self::load_with_env(config_path, |key| std::env::var(key).ok())
    }

    /// Like [`LLMConfig::load`], reading credentials through `env`.
    pub fn load_with_env(config_path: &Path, env: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = match std::fs::read_to_string(config_path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Ignoring malformed {}: {}", config_path.display(), e);
                LLMConfig::default()
            }),
            Err(_) => LLMConfig::default(),
        };

        // Blank keys count as unset.
        for key in [
            &mut config.openai_api_key,
            &mut config.anthropic_api_key,
            &mut config.groq_api_key,
        ] {
            if key.as_deref().is_some_and(|k| k.trim().is_empty()) {
                *key = None;
            }
        }

        let from_env = |name: &str| env(name).filter(|v| !v.trim().is_empty());
        if config.openai_api_key.is_none() {
            config.openai_api_key = from_env("OPENAI_API_KEY");
        }
        if config.anthropic_api_key.is_none() {
            config.anthropic_api_key = from_env("ANTHROPIC_API_KEY");
        }
        if config.groq_api_key.is_none() {
            config.groq_api_key = from_env("GROQ_API_KEY");
        }

        if let Some(sel) = config.resolve_provider() {
            info!("LLM provider: {} ({})", sel.provider, sel.model);
        } else {
            warn!("No LLM provider configured; queries will be rejected");
        }
        config
    }

    fn selection(&self, provider: LLMProvider) -> Option<ProviderSelection> {
        let (key, model) = match provider {
            LLMProvider::OpenAI => (&self.openai_api_key, &self.openai_model),
            LLMProvider::Anthropic => (&self.anthropic_api_key, &self.anthropic_model),
            LLMProvider::Groq => (&self.groq_api_key, &self.groq_model),
        };
        key.as_ref().map(|k| ProviderSelection {
            provider,
            model: model.clone(),
            api_key: k.clone(),
        })
    }

    /// Resolve which provider and model to use.
    pub fn resolve_provider(&self) -> Option<ProviderSelection> {
        match self.preferred_provider.as_str() {
            "openai" => self.selection(LLMProvider::OpenAI),
            "anthropic" => self.selection(LLMProvider::Anthropic),
            "groq" => self.selection(LLMProvider::Groq),
            // Auto mode: OpenAI > Anthropic > Groq
            "auto" => [LLMProvider::OpenAI, LLMProvider::Anthropic, LLMProvider::Groq]
                .into_iter()
                .find_map(|p| self.selection(p)),
            _ => None,
        }
    }

    pub fn openai_configured(&self) -> bool {
        self.openai_api_key.is_some()
    }
}
