use reqwest::Client;
use serde_json::Value;
use smartroute_core::config::TextGenerationConfig;
use smartroute_core::ProviderError;
use tracing::{debug, instrument};

use crate::http::fetch_json;

const PROVIDER: &str = "Ollama";

/// Completion client for an Ollama-compatible `/api/generate` endpoint.
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    config: TextGenerationConfig,
}

impl OllamaClient {
    pub fn new(client: Client, config: TextGenerationConfig) -> Self {
        Self { client, config }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    #[instrument(skip(self, prompt), fields(model = %self.config.model))]
    pub async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let payload = serde_json::json!({
            "model": self.config.model,
            "prompt": prompt,
            "stream": false,
            "options": {
                "temperature": self.config.temperature,
                "num_predict": self.config.max_tokens
            }
        });

        let request = self
            .client
            .post(format!("{}/api/generate", self.config.base_url))
            .json(&payload);
        let body = fetch_json(PROVIDER, request).await?;

        let text = body
            .get("response")
            .and_then(Value::as_str)
            .map(ToString::to_string)
            .ok_or_else(|| ProviderError::Malformed {
                provider: PROVIDER,
                detail: "completion has no response text".to_string(),
            })?;
        debug!(chars = text.len(), "completion received");
        Ok(text)
    }
}
