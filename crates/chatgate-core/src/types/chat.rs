//! Conversation turn types.
//!
//! A conversation is an ordered sequence of [`Turn`]s replayed to the
//! model on every request. Invariant: a non-empty conversation starts
//! with a `system` turn.

use serde::{Deserialize, Serialize};

/// Role of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instruction.
    System,
    /// End-user message.
    User,
    /// Model reply.
    Assistant,
}

impl Role {
    /// Check if this is a system turn.
    pub fn is_system(&self) -> bool {
        matches!(self, Self::System)
    }

    /// Check if this is a user turn.
    pub fn is_user(&self) -> bool {
        matches!(self, Self::User)
    }

    /// Check if this is an assistant turn.
    pub fn is_assistant(&self) -> bool {
        matches!(self, Self::Assistant)
    }
}

/// One message in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Turn role.
    pub role: Role,

    /// Turn content.
    pub content: TurnContent,
}

impl Turn {
    /// Create a system turn.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: TurnContent::Text(content.into()),
        }
    }

    /// Create a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: TurnContent::Text(content.into()),
        }
    }

    /// Create an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: TurnContent::Text(content.into()),
        }
    }

    /// Create a user turn carrying text plus image attachments.
    pub fn user_with_images(text: impl Into<String>, images: Vec<ImageData>) -> Self {
        let mut parts = vec![ContentPart::Text { text: text.into() }];
        parts.extend(images.into_iter().map(|image| ContentPart::Image { image }));
        Self {
            role: Role::User,
            content: TurnContent::Parts(parts),
        }
    }

    /// Get the text content of the turn.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            TurnContent::Text(s) => Some(s),
            TurnContent::Parts(parts) => {
                for part in parts {
                    if let ContentPart::Text { text } = part {
                        return Some(text);
                    }
                }
                None
            }
        }
    }

    /// Check whether the turn carries any image parts.
    pub fn has_images(&self) -> bool {
        match &self.content {
            TurnContent::Text(_) => false,
            TurnContent::Parts(parts) => {
                parts.iter().any(|p| matches!(p, ContentPart::Image { .. }))
            }
        }
    }
}

/// Turn content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TurnContent {
    /// Simple text content.
    Text(String),

    /// Multi-part content (text + images).
    Parts(Vec<ContentPart>),
}

/// A part of multi-modal content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Text content.
    Text { text: String },

    /// Image content.
    Image { image: ImageData },
}

/// Image attachment for vision models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    /// Media type (e.g., "image/jpeg").
    pub media_type: String,

    /// Base64-encoded image bytes.
    pub data: String,
}

impl ImageData {
    /// Create an image from base64 data.
    pub fn new(media_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            media_type: media_type.into(),
            data: data.into(),
        }
    }

    /// Render as a data URI for OpenAI-compatible wire formats.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_creation() {
        let sys = Turn::system("You are a helpful assistant.");
        assert!(sys.role.is_system());
        assert_eq!(sys.text(), Some("You are a helpful assistant."));

        let user = Turn::user("Hello!");
        assert!(user.role.is_user());
        assert_eq!(user.text(), Some("Hello!"));

        let assistant = Turn::assistant("Hi there!");
        assert!(assistant.role.is_assistant());
    }

    #[test]
    fn test_user_with_images() {
        let turn = Turn::user_with_images(
            "what is this?",
            vec![ImageData::new("image/jpeg", "abc123")],
        );

        assert!(turn.role.is_user());
        assert!(turn.has_images());
        assert_eq!(turn.text(), Some("what is this?"));
    }

    #[test]
    fn test_text_turn_has_no_images() {
        let turn = Turn::user("plain text");
        assert!(!turn.has_images());
    }

    #[test]
    fn test_role_serde_values() {
        // Verify the rename_all = "lowercase" serialization.
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
    }

    #[test]
    fn test_text_content_serializes_as_bare_string() {
        let turn = Turn::user("hello");
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["content"], serde_json::json!("hello"));
    }

    #[test]
    fn test_parts_content_serde_roundtrip() {
        let turn = Turn::user_with_images("caption", vec![ImageData::new("image/png", "ZGF0YQ==")]);
        let json = serde_json::to_string(&turn).unwrap();
        let parsed: Turn = serde_json::from_str(&json).unwrap();
        assert_eq!(turn, parsed);

        // Parts are tagged by "type"
        let value = serde_json::to_value(&turn).unwrap();
        assert_eq!(value["content"][0]["type"], "text");
        assert_eq!(value["content"][0]["text"], "caption");
        assert_eq!(value["content"][1]["type"], "image");
        assert_eq!(value["content"][1]["image"]["media_type"], "image/png");
    }

    #[test]
    fn test_data_uri() {
        let img = ImageData::new("image/jpeg", "abc123");
        assert_eq!(img.data_uri(), "data:image/jpeg;base64,abc123");
    }
}
