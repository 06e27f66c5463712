//! Common types for the model provider.

use serde::{Deserialize, Serialize};

/// Chat completion options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatOptions {
    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<usize>,

    /// Temperature for sampling (0.0 to 2.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl ChatOptions {
    /// Create new chat options with max tokens.
    pub fn with_max_tokens(max_tokens: usize) -> Self {
        Self {
            max_tokens: Some(max_tokens),
            ..Default::default()
        }
    }

    /// Set temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// Chat completion response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    /// Response ID assigned by the provider.
    pub id: String,

    /// Model used.
    pub model: String,

    /// Reply text.
    pub content: String,

    /// Token usage.
    pub usage: Usage,
}

/// Token usage information.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Prompt tokens.
    pub prompt_tokens: usize,

    /// Completion tokens.
    pub completion_tokens: usize,
}

impl Usage {
    /// Get total tokens used.
    pub fn total(&self) -> usize {
        self.prompt_tokens + self.completion_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_options() {
        let opts = ChatOptions::with_max_tokens(1024).temperature(0.7);

        assert_eq!(opts.max_tokens, Some(1024));
        assert_eq!(opts.temperature, Some(0.7));
    }

    #[test]
    fn test_usage_total() {
        let usage = Usage {
            prompt_tokens: 100,
            completion_tokens: 50,
        };

        assert_eq!(usage.total(), 150);
    }
}
