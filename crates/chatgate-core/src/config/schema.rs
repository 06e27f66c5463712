//! Configuration schema definitions.

use crate::history;
use crate::secret::SecretString;
use serde::{Deserialize, Serialize};

/// Main ChatGate configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Shared-secret gate settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Model selection.
    #[serde(default)]
    pub models: ModelsConfig,

    /// Chat and history settings.
    #[serde(default)]
    pub chat: ChatConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port number.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Enable CORS for the browser front-end.
    #[serde(default = "default_true")]
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: true,
        }
    }
}

/// Shared-secret gate configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// The shared secret every request must present.
    #[serde(default)]
    pub password: SecretString,
}

/// Model selection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Default chat model.
    #[serde(default = "default_model")]
    pub default: String,

    /// Model used whenever images are attached.
    #[serde(default = "default_vision_model")]
    pub vision: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            default: default_model(),
            vision: default_vision_model(),
        }
    }
}

/// Chat and history configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// System prompt used when the caller supplies none.
    #[serde(default = "default_system_prompt")]
    pub default_system_prompt: String,

    /// Number of trailing turns retained by the history window.
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Word-count ceiling on inbound messages.
    #[serde(default = "default_max_message_words")]
    pub max_message_words: usize,

    /// Token cap passed to the provider.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Sampling temperature used when the caller supplies none.
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            default_system_prompt: default_system_prompt(),
            history_window: default_history_window(),
            max_message_words: default_max_message_words(),
            max_tokens: default_max_tokens(),
            default_temperature: default_temperature(),
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing filter directive.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8700
}

fn default_true() -> bool {
    true
}

fn default_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_vision_model() -> String {
    "meta-llama/llama-4-scout-17b-16e-instruct".to_string()
}

fn default_system_prompt() -> String {
    "You are ChatGate, a helpful, advanced and minimal AI.".to_string()
}

fn default_history_window() -> usize {
    history::DEFAULT_WINDOW
}

fn default_max_message_words() -> usize {
    1000
}

fn default_max_tokens() -> usize {
    1024
}

fn default_temperature() -> f32 {
    0.7
}

fn default_log_level() -> String {
    "chatgate=info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8700);
        assert!(config.server.cors);
        assert_eq!(config.models.default, "llama-3.1-8b-instant");
        assert_eq!(config.chat.history_window, 4);
        assert_eq!(config.chat.max_message_words, 1000);
        assert_eq!(config.chat.max_tokens, 1024);
        assert!(config.auth.password.is_empty());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"server": {"port": 9000}}"#).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.chat.history_window, 4);
    }
}
