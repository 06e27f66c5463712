//! Common type definitions for ChatGate.

mod chat;

pub use chat::{ContentPart, ImageData, Role, Turn, TurnContent};
