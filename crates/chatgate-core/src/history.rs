//! Rolling conversation history window.
//!
//! Bounds the history replayed to the model while keeping the leading
//! system instruction pinned at index 0. Only the trailing turns slide:
//! the system turn anchors model behavior and must never scroll out,
//! while everything else is cheap to discard.

use crate::types::{Role, Turn, TurnContent};

/// Default number of trailing turns retained by [`HistoryWindow::trim`].
pub const DEFAULT_WINDOW: usize = 4;

/// Stateless manager for the rolling history window.
///
/// All state is caller-held; every operation works on its own input and
/// is safe to invoke concurrently from independent requests.
pub struct HistoryWindow;

impl HistoryWindow {
    /// Create a fresh one-turn history holding the system instruction.
    pub fn new_history(system_prompt: &str) -> Vec<Turn> {
        vec![Turn::system(system_prompt)]
    }

    /// Bound `history` to the system turn plus the last `max_trailing`
    /// turns.
    ///
    /// Returns the input unchanged when it already fits
    /// (`len <= max_trailing + 1`). An empty history comes back empty:
    /// this operation never synthesizes a system turn, that belongs to
    /// [`Self::new_history`].
    pub fn trim(history: &[Turn], max_trailing: usize) -> Vec<Turn> {
        if history.len() <= max_trailing + 1 {
            return history.to_vec();
        }

        let split_point = history.len() - max_trailing;
        let mut trimmed = Vec::with_capacity(1 + max_trailing);
        trimmed.push(history[0].clone());
        trimmed.extend_from_slice(&history[split_point..]);
        trimmed
    }

    /// Overwrite the leading system turn's content in place.
    ///
    /// No-op when the history is empty or does not start with a system
    /// turn. Supports changing the instruction mid-conversation without
    /// losing trim position.
    pub fn override_system(history: &mut [Turn], prompt: &str) {
        if let Some(first) = history.first_mut() {
            if first.role == Role::System {
                first.content = TurnContent::Text(prompt.to_string());
            }
        }
    }

    /// Replace an image-carrying user turn's content with a short text
    /// placeholder.
    ///
    /// Keeps image bytes out of the history handed back to the caller:
    /// the next round-trip resubmits the placeholder, not the payload.
    pub fn image_placeholder(turn: &mut Turn, query: &str) {
        turn.content = TurnContent::Text(format!("[Image Analyzed]: {}", query));
    }
}
