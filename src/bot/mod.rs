//! Bot module for handling Telegram interactions
//!
//! This module is split into two submodules:
//! - `message_handler`: classifies incoming updates and drives the dialogue
//! - `effects`: executes the effects the state machine requests

pub mod effects;
pub mod message_handler;

// Re-export the endpoint functions for use in main.rs
pub use message_handler::{command_handler, message_handler};
