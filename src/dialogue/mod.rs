//! Conversation state machine for the weather dialogue.
//!
//! This module is split into several submodules:
//! - `state`: the conversation state enum and dialogue alias
//! - `message`: the incoming message model (commands, text, photos, locations)
//! - `transition`: the pure transition function and its reply texts

pub mod message;
pub mod state;
pub mod transition;

pub use message::{highest_resolution, Command, IncomingMessage, MessageKind, PhotoVariant, Sender};
pub use state::{ConversationState, WeatherDialogue};
pub use transition::{respond, text, Effect, Transition};
