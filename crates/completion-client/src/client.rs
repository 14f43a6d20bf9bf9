//! Completion client implementation.

use reqwest::Client;
use tracing::debug;

use crate::api_types::{ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::config::CompletionConfig;
use crate::error::CompletionError;

/// HTTP client for an OpenAI-compatible chat-completions endpoint.
pub struct CompletionClient {
    client: Client,
    config: CompletionConfig,
}

impl CompletionClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CompletionConfig) -> Result<Self, CompletionError> {
        if config.api_key.is_empty() {
            return Err(CompletionError::Configuration(
                "API key is empty".to_string(),
            ));
        }

        let client = Client::builder().build().map_err(|e| {
            CompletionError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self { client, config })
    }

    /// Create a client from environment variables.
    ///
    /// See [`CompletionConfig::from_env`] for the variables involved.
    pub fn from_env() -> Result<Self, CompletionError> {
        Self::new(CompletionConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Run a single system+user exchange and return the assistant text.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError> {
        let messages = vec![ChatMessage::system(system), ChatMessage::user(user)];
        self.chat_completion(messages).await
    }

    /// Make a chat completion request.
    pub async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<String, CompletionError> {
        let url = format!("{}/v1/chat/completions", self.config.api_url);

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!(model = %request.model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Prefer the structured provider error when it parses
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                return Err(CompletionError::Provider(format!(
                    "API error ({}): {}",
                    status.as_u16(),
                    api_error.error.message
                )));
            }

            return Err(CompletionError::Provider(format!(
                "API error ({}): {}",
                status.as_u16(),
                error_text
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Provider(format!("Failed to parse response: {}", e)))?;

        if let Some(usage) = &completion.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Completion token usage"
            );
        }

        completion
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| CompletionError::Provider("No content in response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_is_rejected() {
        let config = CompletionConfig::default();
        let result = CompletionClient::new(config);
        assert!(matches!(result, Err(CompletionError::Configuration(_))));
    }

    #[test]
    fn test_client_holds_config() {
        let config = CompletionConfig::builder().api_key("test-key").build();
        let client = CompletionClient::new(config).unwrap();
        assert_eq!(client.config().model, "gpt-4o-mini");
    }
}
