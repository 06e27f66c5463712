//! The `/ask` relay handler.
//!
//! One round-trip: gate on the shared secret, validate inputs, window
//! the caller-supplied history, relay to the provider, and hand the
//! updated history back for the caller to resubmit next turn. Nothing
//! is persisted server-side.

use crate::error::GatewayError;
use crate::server::GatewayState;
use axum::extract::{Multipart, State};
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chatgate_core::{HistoryWindow, ImageData, SecretString, Turn};
use chatgate_providers::{ChatOptions, Usage};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Response payload for `/ask`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    /// Reply text (or a descriptive error message on failure).
    pub response: String,

    /// Token usage counters.
    pub tokens: TokenCounts,

    /// Updated history for the caller to store and resubmit.
    /// Absent on failure paths: history is never advanced on error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_history: Option<Vec<Turn>>,
}

/// Token usage counters reported to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCounts {
    pub prompt: usize,
    pub completion: usize,
    pub total: usize,
}

impl TokenCounts {
    /// Zeroed counters, used on every failure path.
    pub fn zero() -> Self {
        Self::default()
    }
}

impl From<Usage> for TokenCounts {
    fn from(usage: Usage) -> Self {
        Self {
            prompt: usage.prompt_tokens,
            completion: usage.completion_tokens,
            total: usage.total(),
        }
    }
}

/// Parsed `/ask` form fields.
#[derive(Default)]
struct AskForm {
    password: Option<String>,
    api_key: Option<String>,
    message: String,
    history: Option<String>,
    system_prompt: Option<String>,
    temperature: Option<String>,
    model: Option<String>,
    images: Vec<ImageData>,
}

/// Handle one `/ask` request.
pub async fn ask_handler(
    State(state): State<Arc<GatewayState>>,
    multipart: Multipart,
) -> Result<Json<AskResponse>, GatewayError> {
    let request_id = Uuid::new_v4();
    let form = read_form(multipart).await?;
    debug!(%request_id, images = form.images.len(), "received /ask request");

    let config = &state.config;

    // 1. Shared-secret gate, before anything else.
    let presented = SecretString::from(form.password.unwrap_or_default());
    if config.auth.password.is_empty() || presented != config.auth.password {
        return Err(GatewayError::Auth);
    }

    // 2. The caller must upload a provider key; none is stored here.
    let api_key = form
        .api_key
        .filter(|k| !k.is_empty())
        .ok_or_else(|| GatewayError::validation("No provider API key supplied"))?;

    // 3. Word-count ceiling.
    let word_count = form.message.split_whitespace().count();
    if word_count > config.chat.max_message_words {
        return Err(GatewayError::validation(format!(
            "Message too long ({} words, limit {})",
            word_count, config.chat.max_message_words
        )));
    }

    let temperature = match form.temperature.filter(|t| !t.is_empty()) {
        Some(raw) => raw.trim().parse::<f32>().map_err(|_| {
            GatewayError::validation(format!("Invalid temperature: {}", raw))
        })?,
        None => config.chat.default_temperature,
    };

    // 4. Prior history from the caller, or a fresh one-turn history.
    let mut history: Vec<Turn> = match form.history.filter(|h| !h.is_empty()) {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|e| GatewayError::validation(format!("Malformed history: {}", e)))?,
        None => HistoryWindow::new_history(&config.chat.default_system_prompt),
    };

    // Any attached image forces the vision model; the default text
    // model cannot accept image parts.
    let has_images = !form.images.is_empty();
    let model = if has_images {
        config.models.vision.clone()
    } else {
        form.model
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| config.models.default.clone())
    };

    // 5-7. Apply the caller's instruction, cap prior growth, append the
    // new user turn.
    let system_prompt = form
        .system_prompt
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| config.chat.default_system_prompt.clone());
    HistoryWindow::override_system(&mut history, &system_prompt);

    let mut history = HistoryWindow::trim(&history, config.chat.history_window);

    let user_turn = if has_images {
        Turn::user_with_images(form.message.clone(), form.images)
    } else {
        Turn::user(form.message.clone())
    };
    history.push(user_turn);

    // 8. Relay to the provider. On failure the error propagates and
    // history is neither advanced nor returned.
    let provider = (state.provider_factory)(&api_key)?;
    let options =
        ChatOptions::with_max_tokens(config.chat.max_tokens).temperature(temperature);
    let completion = provider.complete(&model, &history, options).await?;

    // 9. Swap image payloads for a placeholder so the caller never
    // resubmits the bytes, append the reply, and cap again.
    if has_images {
        if let Some(last) = history.last_mut() {
            HistoryWindow::image_placeholder(last, &form.message);
        }
    }
    history.push(Turn::assistant(completion.content.clone()));
    let new_history = HistoryWindow::trim(&history, config.chat.history_window);

    info!(
        %request_id,
        model = %model,
        tokens = completion.usage.total(),
        "completed /ask request"
    );

    Ok(Json(AskResponse {
        response: completion.content,
        tokens: completion.usage.into(),
        new_history: Some(new_history),
    }))
}

/// Drain the multipart stream into an [`AskForm`].
///
/// Every file part whose name starts with `image` is base64-encoded;
/// its media type defaults to JPEG when the browser sends none.
async fn read_form(mut multipart: Multipart) -> Result<AskForm, GatewayError> {
    let mut form = AskForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| GatewayError::validation(format!("Malformed form data: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name.starts_with("image") {
            let media_type = field
                .content_type()
                .map(str::to_string)
                .unwrap_or_else(|| "image/jpeg".to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| GatewayError::validation(format!("Unreadable image: {}", e)))?;
            form.images.push(ImageData::new(media_type, BASE64.encode(&bytes)));
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| GatewayError::validation(format!("Unreadable field {}: {}", name, e)))?;

        match name.as_str() {
            "password" => form.password = Some(value),
            "api_key" => form.api_key = Some(value),
            "message" => form.message = value,
            "history" => form.history = Some(value),
            "system_prompt" => form.system_prompt = Some(value),
            "temperature" => form.temperature = Some(value),
            "model" => form.model = Some(value),
            // Unknown fields are ignored rather than rejected
            _ => debug!(field = %name, "ignoring unknown form field"),
        }
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_counts_from_usage() {
        let usage = Usage {
            prompt_tokens: 10,
            completion_tokens: 4,
        };
        let counts = TokenCounts::from(usage);
        assert_eq!(counts.prompt, 10);
        assert_eq!(counts.completion, 4);
        assert_eq!(counts.total, 14);
    }

    #[test]
    fn test_error_body_omits_history() {
        let body = AskResponse {
            response: "Invalid backend password".to_string(),
            tokens: TokenCounts::zero(),
            new_history: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("new_history").is_none());
        assert_eq!(json["tokens"]["total"], 0);
    }
}
