//! # chatgate-core
//!
//! Core types, configuration, and utilities for ChatGate.
//!
//! This crate provides shared functionality used across all ChatGate crates:
//!
//! - **Configuration**: Loading, validation, and management of config files
//! - **Types**: Conversation turn and content definitions
//! - **History**: The rolling conversation window replayed to the model

pub mod config;
pub mod error;
pub mod history;
pub mod paths;
pub mod secret;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use error::{Error, Result};
pub use history::HistoryWindow;
pub use secret::SecretString;
pub use types::*;
