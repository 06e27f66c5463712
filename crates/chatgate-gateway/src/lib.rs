//! HTTP gateway server for ChatGate.
//!
//! This crate provides:
//! - The `/ask` relay endpoint: shared-secret gate, input validation,
//!   history window management, and the downstream provider call
//! - A `/health` liveness endpoint

pub mod ask;
pub mod error;
pub mod server;

pub use ask::{AskResponse, TokenCounts};
pub use error::GatewayError;
pub use server::{Gateway, GatewayState, ProviderFactory};

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
