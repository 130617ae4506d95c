//! HTTP client for an Ollama-compatible chat endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use helpdesk_core::config::ModelConfig;
use helpdesk_core::error::HelpdeskError;

use crate::prompt::PromptPayload;
use crate::LanguageModel;

/// Client for the `/api/chat` endpoint of a local Ollama server.
///
/// The request timeout from [`ModelConfig`] is baked into the underlying
/// reqwest client, so a hung model cannot stall a chat turn indefinitely.
pub struct OllamaClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}

impl OllamaClient {
    pub fn new(config: &ModelConfig) -> Result<Self, HelpdeskError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| HelpdeskError::Model(format!("Failed to build http client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl LanguageModel for OllamaClient {
    async fn invoke(&self, payload: &PromptPayload) -> Result<String, HelpdeskError> {
        let url = format!("{}/api/chat", self.endpoint);
        let body = json!({
            "model": self.model,
            "messages": payload.messages,
            "stream": false,
            "options": { "temperature": self.temperature },
        });

        debug!(model = %self.model, messages = payload.messages.len(), "Invoking model");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    HelpdeskError::Model("Model request timed out".to_string())
                } else {
                    HelpdeskError::Model(format!("Model request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HelpdeskError::Model(format!(
                "Model endpoint returned {}",
                status
            )));
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| HelpdeskError::Model(format!("Invalid model response: {}", e)))?;

        Ok(completion.message.content)
    }
}
