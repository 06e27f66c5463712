//! Model provider client for ChatGate.
//!
//! This crate defines the one capability the gateway needs from a
//! model provider — a single chat completion — and implements it for
//! Groq's OpenAI-compatible API.
//!
//! # Example
//!
//! ```rust,ignore
//! use chatgate_core::Turn;
//! use chatgate_providers::{ChatProvider, GroqProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GroqProvider::new("caller-supplied-key")?;
//!
//!     let history = vec![Turn::user("Hello!")];
//!     let completion = provider
//!         .complete("llama-3.1-8b-instant", &history, Default::default())
//!         .await?;
//!     println!("Reply: {}", completion.content);
//!
//!     Ok(())
//! }
//! ```

mod error;
mod types;

pub mod groq;

pub use error::{ProviderError, Result};
pub use groq::GroqProvider;
pub use types::{ChatOptions, Completion, Usage};

use async_trait::async_trait;
use chatgate_core::Turn;

/// A model provider that can generate chat completions.
///
/// One operation by design: the gateway needs nothing else, and the
/// narrow seam keeps the history-window logic testable without network
/// access.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Get provider name.
    fn name(&self) -> &str;

    /// Generate a chat completion for the given history.
    async fn complete(
        &self,
        model: &str,
        history: &[Turn],
        options: ChatOptions,
    ) -> Result<Completion>;
}
