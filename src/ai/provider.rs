use async_trait::async_trait;
use tracing::info;

use crate::config::{AIProvider, AiConfig};
use crate::core::{DemError, Result};

/// The text collaborator behind every AI call site
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String>;

    fn name(&self) -> &str;
}

/// Never answers. Every call site falls back.
#[derive(Debug, Clone, Default)]
pub struct OfflineProvider;

#[async_trait]
impl TextGenerator for OfflineProvider {
    async fn generate(&self, _prompt: &str, _max_tokens: u32) -> Result<String> {
        Err(DemError::Provider("offline".to_string()))
    }

    fn name(&self) -> &str {
        "offline"
    }
}

#[cfg(feature = "remote-ai")]
pub use remote::AnthropicProvider;

#[cfg(feature = "remote-ai")]
mod remote {
    use super::*;
    use tracing::debug;

    pub const ANTHROPIC_VERSION: &str = "2023-06-01";

    /// Messages API client
    pub struct AnthropicProvider {
        client: reqwest::Client,
        api_key: String,
        model: String,
        base_url: String,
    }

    impl AnthropicProvider {
        pub fn new(api_key: String, model: String, base_url: String) -> Self {
            AnthropicProvider {
                client: reqwest::Client::new(),
                api_key,
                model,
                base_url,
            }
        }
    }

    fn transport(e: reqwest::Error) -> DemError {
        DemError::Provider(e.to_string())
    }

    #[async_trait]
    impl TextGenerator for AnthropicProvider {
        async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String> {
            let body = serde_json::json!({
                "model": self.model,
                "max_tokens": max_tokens,
                "messages": [{"role": "user", "content": prompt}],
            });

            let url = format!("{}/v1/messages", self.base_url.trim_end_matches('/'));
            let response = self
                .client
                .post(&url)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&body)
                .send()
                .await
                .map_err(transport)?;

            if !response.status().is_success() {
                let status = response.status();
                let error_text = response.text().await.unwrap_or_default();
                return Err(DemError::Provider(format!(
                    "Anthropic API error {}: {}",
                    status, error_text
                )));
            }

            let response_json: serde_json::Value = response.json().await.map_err(transport)?;

            // a non-text first block reads as an empty answer
            let text = match response_json["content"][0]["type"].as_str() {
                Some("text") => response_json["content"][0]["text"]
                    .as_str()
                    .unwrap_or_default(),
                _ => "",
            };
            debug!(model = %self.model, chars = text.len(), "provider answered");
            Ok(text.trim().to_string())
        }

        fn name(&self) -> &str {
            "anthropic"
        }
    }
}

/// Pick the generator for a configuration. Without the `remote-ai` feature or
/// without an API key every call falls back.
pub fn build_generator(config: &AiConfig) -> Box<dyn TextGenerator> {
    match config.provider {
        AIProvider::Offline => Box::new(OfflineProvider),
        AIProvider::Anthropic => remote_generator(config),
    }
}

#[cfg(feature = "remote-ai")]
fn remote_generator(config: &AiConfig) -> Box<dyn TextGenerator> {
    match config.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
        Some(key) => Box::new(AnthropicProvider::new(
            key.to_string(),
            config.model.clone(),
            config.base_url(),
        )),
        None => {
            info!("no API key configured, AI features use fallbacks");
            Box::new(OfflineProvider)
        }
    }
}

#[cfg(not(feature = "remote-ai"))]
fn remote_generator(_config: &AiConfig) -> Box<dyn TextGenerator> {
    info!("built without remote-ai, AI features use fallbacks");
    Box::new(OfflineProvider)
}
