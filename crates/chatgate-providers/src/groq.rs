//! Groq provider implementation.
//!
//! Groq exposes an OpenAI-compatible chat completions API; this module
//! speaks that dialect over reqwest. The provider is constructed per
//! request from the caller-uploaded API key.

use crate::{ChatOptions, ChatProvider, Completion, ProviderError, Result, Usage};
use async_trait::async_trait;
use chatgate_core::{ContentPart, Role, Turn, TurnContent};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default Groq API base URL.
const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Groq chat completion provider.
pub struct GroqProvider {
    /// HTTP client.
    client: Client,

    /// API key.
    api_key: SecretString,

    /// API base URL.
    api_base: String,
}

impl GroqProvider {
    /// Create a new Groq provider with an API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ProviderError::config("API key is required"));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(300))
            .build()
            .map_err(|e| ProviderError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: SecretString::new(api_key),
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Set the API base URL (for compatible APIs and tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base = url.into();
        self
    }

    /// Convert turns to the OpenAI-compatible wire format.
    fn convert_history(&self, history: &[Turn]) -> Vec<WireMessage> {
        history
            .iter()
            .map(|turn| {
                let role = match turn.role {
                    Role::System => "system",
                    Role::User => "user",
                    Role::Assistant => "assistant",
                };

                let content = match &turn.content {
                    TurnContent::Text(s) => WireContent::Text(s.clone()),
                    TurnContent::Parts(parts) => {
                        let wire_parts = parts
                            .iter()
                            .map(|part| match part {
                                ContentPart::Text { text } => {
                                    WireContentPart::Text { text: text.clone() }
                                }
                                ContentPart::Image { image } => WireContentPart::ImageUrl {
                                    image_url: ImageUrl {
                                        url: image.data_uri(),
                                    },
                                },
                            })
                            .collect();
                        WireContent::Parts(wire_parts)
                    }
                };

                WireMessage {
                    role: role.to_string(),
                    content: Some(content),
                }
            })
            .collect()
    }

    /// Parse the provider response.
    fn parse_response(&self, response: WireResponse) -> Result<Completion> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::internal("No choices in response"))?;

        let content = match choice.message.content {
            Some(WireContent::Text(s)) => s,
            Some(WireContent::Parts(parts)) => parts
                .into_iter()
                .filter_map(|p| match p {
                    WireContentPart::Text { text } => Some(text),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join(""),
            None => String::new(),
        };

        Ok(Completion {
            id: response.id,
            model: response.model,
            content,
            usage: Usage {
                prompt_tokens: response.usage.prompt_tokens,
                completion_tokens: response.usage.completion_tokens,
            },
        })
    }
}

#[async_trait]
impl ChatProvider for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    async fn complete(
        &self,
        model: &str,
        history: &[Turn],
        options: ChatOptions,
    ) -> Result<Completion> {
        let request = WireRequest {
            model: model.to_string(),
            messages: self.convert_history(history),
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            stream: false,
        };

        debug!("Sending request to Groq: model={}", model);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body: WireError = response.json().await.unwrap_or_else(|_| WireError {
                error: WireErrorDetail {
                    message: "Unknown error".to_string(),
                },
            });

            return match status.as_u16() {
                401 => Err(ProviderError::auth(error_body.error.message)),
                429 => Err(ProviderError::rate_limit(error_body.error.message, None)),
                400 => Err(ProviderError::invalid_request(error_body.error.message)),
                _ => Err(ProviderError::server_error(
                    status.as_u16(),
                    error_body.error.message,
                )),
            };
        }

        let response: WireResponse = response.json().await?;
        self.parse_response(response)
    }
}

// Internal types for the OpenAI-compatible API

#[derive(Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
}

#[derive(Serialize, Deserialize)]
struct WireMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<WireContent>,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WireContent {
    Text(String),
    Parts(Vec<WireContentPart>),
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize, Deserialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct WireResponse {
    id: String,
    model: String,
    choices: Vec<WireChoice>,
    usage: WireUsage,
}

#[derive(Deserialize)]
struct WireChoice {
    message: WireMessage,
}

#[derive(Deserialize)]
struct WireUsage {
    prompt_tokens: usize,
    completion_tokens: usize,
}

#[derive(Deserialize)]
struct WireError {
    error: WireErrorDetail,
}

#[derive(Deserialize)]
struct WireErrorDetail {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatgate_core::ImageData;

    #[test]
    fn test_provider_creation() {
        let provider = GroqProvider::new("test-key").unwrap();
        assert_eq!(provider.name(), "groq");
    }

    #[test]
    fn test_provider_empty_key() {
        let result = GroqProvider::new("");
        assert!(result.is_err());
    }

    #[test]
    fn test_convert_history_roles() {
        let provider = GroqProvider::new("test-key").unwrap();
        let history = vec![
            Turn::system("sys"),
            Turn::user("hi"),
            Turn::assistant("hello"),
        ];

        let wire = provider.convert_history(&history);
        assert_eq!(wire.len(), 3);
        assert_eq!(wire[0].role, "system");
        assert_eq!(wire[1].role, "user");
        assert_eq!(wire[2].role, "assistant");
    }

    #[test]
    fn test_convert_history_image_data_uri() {
        let provider = GroqProvider::new("test-key").unwrap();
        let history = vec![Turn::user_with_images(
            "what is this?",
            vec![ImageData::new("image/jpeg", "Zm9v")],
        )];

        let wire = provider.convert_history(&history);
        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json[0]["content"][0]["type"], "text");
        assert_eq!(json[0]["content"][1]["type"], "image_url");
        assert_eq!(
            json[0]["content"][1]["image_url"]["url"],
            "data:image/jpeg;base64,Zm9v"
        );
    }
}
