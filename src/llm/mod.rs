//! Language model adapter
//!
//! The planner talks to the hosted model only through [`LanguageModel`], so a
//! recording fake can stand in for Gemini in tests.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::LlmConfig;
use crate::extract::RawResponse;

pub mod gemini;

pub use gemini::GeminiClient;

/// A hosted chat-completion model that answers a single prompt.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send `prompt` and return the model's reply in whatever shape the
    /// provider produces; see [`crate::extract::extract`].
    async fn invoke(&self, prompt: &str) -> crate::Result<RawResponse>;
}

/// Build the configured model, or `None` when no credential is set.
pub fn from_config(config: &LlmConfig) -> crate::Result<Option<Arc<dyn LanguageModel>>> {
    let Some(api_key) = config.api_key.as_deref() else {
        tracing::warn!("No Gemini API key configured, plans will contain setup guidance only");
        return Ok(None);
    };

    let client = GeminiClient::new(
        api_key,
        &config.model,
        &config.base_url,
        config.temperature,
    )?;
    tracing::info!("Using Gemini model {}", config.model);
    Ok(Some(Arc::new(client)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_key_means_unavailable() {
        let config = LlmConfig::default();
        assert!(from_config(&config).unwrap().is_none());
    }

    #[test]
    fn test_key_builds_client() {
        let config = LlmConfig {
            api_key: Some("test-key-123".to_string()),
            ..LlmConfig::default()
        };
        assert!(from_config(&config).unwrap().is_some());
    }
}
