//! Conversation state for the weather dialogue.

use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

/// Where a conversation currently stands.
///
/// Exactly one value is active per conversation. An entry is created in the
/// dialogue store on `/start` and removed when a handler returns `Ended`,
/// so an absent entry and `Ended` mean the same thing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversationState {
    AwaitingBio,
    AwaitingPhoto,
    AwaitingLocation,
    #[default]
    Ended,
}

impl ConversationState {
    /// `Ended` is the only terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ConversationState::Ended)
    }
}

/// Type alias for the weather dialogue
pub type WeatherDialogue = Dialogue<ConversationState, InMemStorage<ConversationState>>;
