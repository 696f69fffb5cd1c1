//! The pure transition function: `(state, message) -> (next state, effects)`.
//!
//! No I/O happens here. Every side effect the dialogue wants (replies, log
//! lines, photo downloads, the forecast request) comes back as an [`Effect`]
//! for the bot adapter to execute, so the whole table is testable with
//! synthetic messages.

use crate::report::WeatherQuery;

use super::message::{highest_resolution, Command, IncomingMessage, MessageKind, PhotoVariant};
use super::state::ConversationState;

/// Reply texts used by the state machine.
pub mod text {
    pub const GREETING: &str = "Hello, to start using bot please tell about yourself";
    pub const PHOTO_PROMPT: &str =
        "Got it! Now send me a photo of yourself, or /skip if you'd rather not.";
    pub const LOCATION_PROMPT: &str =
        "Now share your location, or type the name of your city.";
    pub const START_HINT: &str = "Send /start to begin a new conversation.";
    pub const UNRECOGNIZED: &str =
        "I didn't expect that here. Follow the prompts, or send /cancel to stop.";
}

/// A side effect requested by the state machine.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Send a plain-text reply to the conversation.
    Reply(String),
    /// Emit a log line tagged with the conversation.
    Log(String),
    /// Download and store a photo attachment.
    SavePhoto(PhotoVariant),
    /// Fetch the one-hour-ahead forecast and reply with the report.
    SendForecast(WeatherQuery),
}

/// The outcome of handling one message.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub next: ConversationState,
    pub effects: Vec<Effect>,
}

/// Handles one message in the given state.
///
/// `/start` restarts the conversation from any state. `/cancel` ends any
/// non-terminal conversation with a single log line and no reply. A message
/// shape not accepted by the current state leaves the state unchanged and
/// nudges the user instead of being silently dropped.
pub fn respond(state: &ConversationState, message: &IncomingMessage) -> Transition {
    use ConversationState::*;

    match (state, &message.kind) {
        (_, MessageKind::Command(Command::Start)) => Transition {
            next: AwaitingBio,
            effects: vec![
                Effect::Log(format!("Start bot for user {}", message.from.describe())),
                Effect::Reply(text::GREETING.to_string()),
            ],
        },
        // No active conversation: everything except /start gets a hint.
        (Ended, _) => Transition {
            next: Ended,
            effects: vec![Effect::Reply(text::START_HINT.to_string())],
        },
        (_, MessageKind::Command(Command::Cancel)) => Transition {
            next: Ended,
            effects: vec![Effect::Log(format!(
                "User {} canceled the conversation",
                message.from.first_name
            ))],
        },
        (AwaitingBio, MessageKind::Text(bio)) => Transition {
            next: AwaitingPhoto,
            effects: vec![
                Effect::Log(format!(
                    "Ask bio for user {}, got {}",
                    message.from.describe(),
                    bio
                )),
                Effect::Reply(text::PHOTO_PROMPT.to_string()),
            ],
        },
        (AwaitingPhoto, MessageKind::Photo(variants)) => match highest_resolution(variants) {
            Some(best) => Transition {
                next: AwaitingLocation,
                effects: vec![
                    Effect::SavePhoto(best.clone()),
                    Effect::Reply(text::LOCATION_PROMPT.to_string()),
                ],
            },
            // A photo message with no size variants cannot be stored.
            None => unrecognized(state),
        },
        (AwaitingPhoto, MessageKind::Command(Command::Skip)) => Transition {
            next: AwaitingLocation,
            effects: vec![Effect::Reply(text::LOCATION_PROMPT.to_string())],
        },
        (AwaitingLocation, MessageKind::Location { latitude, longitude }) => Transition {
            next: Ended,
            effects: vec![Effect::SendForecast(WeatherQuery::Coordinates {
                latitude: *latitude,
                longitude: *longitude,
            })],
        },
        (AwaitingLocation, MessageKind::Text(city)) => Transition {
            next: Ended,
            effects: vec![Effect::SendForecast(WeatherQuery::City(city.clone()))],
        },
        _ => unrecognized(state),
    }
}

fn unrecognized(state: &ConversationState) -> Transition {
    Transition {
        next: state.clone(),
        effects: vec![Effect::Reply(text::UNRECOGNIZED.to_string())],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::message::Sender;

    fn sender() -> Sender {
        Sender {
            id: 7,
            first_name: "Ada".to_string(),
            username: Some("ada".to_string()),
            language_code: Some("en".to_string()),
        }
    }

    fn message(kind: MessageKind) -> IncomingMessage {
        IncomingMessage {
            from: sender(),
            kind,
        }
    }

    fn photo(file_id: &str, width: u32, height: u32) -> PhotoVariant {
        PhotoVariant {
            file_id: file_id.to_string(),
            width,
            height,
        }
    }

    #[test]
    fn test_start_resets_from_every_state() {
        let start = message(MessageKind::Command(Command::Start));
        for state in [
            ConversationState::AwaitingBio,
            ConversationState::AwaitingPhoto,
            ConversationState::AwaitingLocation,
            ConversationState::Ended,
        ] {
            let transition = respond(&state, &start);
            assert_eq!(transition.next, ConversationState::AwaitingBio);
            assert!(transition
                .effects
                .contains(&Effect::Reply(text::GREETING.to_string())));
        }
    }

    #[test]
    fn test_any_bio_text_advances_to_photo() {
        for bio in ["I like trains", ""] {
            let transition = respond(
                &ConversationState::AwaitingBio,
                &message(MessageKind::Text(bio.to_string())),
            );
            assert_eq!(transition.next, ConversationState::AwaitingPhoto);
            assert!(transition
                .effects
                .contains(&Effect::Reply(text::PHOTO_PROMPT.to_string())));
        }
    }

    #[test]
    fn test_cancel_logs_once_and_never_replies() {
        let cancel = message(MessageKind::Command(Command::Cancel));
        for state in [
            ConversationState::AwaitingBio,
            ConversationState::AwaitingPhoto,
            ConversationState::AwaitingLocation,
        ] {
            let transition = respond(&state, &cancel);
            assert_eq!(transition.next, ConversationState::Ended);
            assert_eq!(transition.effects.len(), 1);
            assert!(matches!(transition.effects[0], Effect::Log(_)));
        }
    }

    #[test]
    fn test_photo_stores_largest_variant() {
        let transition = respond(
            &ConversationState::AwaitingPhoto,
            &message(MessageKind::Photo(vec![
                photo("big", 1280, 960),
                photo("small", 90, 60),
            ])),
        );
        assert_eq!(transition.next, ConversationState::AwaitingLocation);
        assert_eq!(transition.effects[0], Effect::SavePhoto(photo("big", 1280, 960)));
    }

    #[test]
    fn test_skip_advances_without_storing() {
        let transition = respond(
            &ConversationState::AwaitingPhoto,
            &message(MessageKind::Command(Command::Skip)),
        );
        assert_eq!(transition.next, ConversationState::AwaitingLocation);
        assert_eq!(
            transition.effects,
            vec![Effect::Reply(text::LOCATION_PROMPT.to_string())]
        );
    }

    #[test]
    fn test_location_requests_coordinate_forecast() {
        let transition = respond(
            &ConversationState::AwaitingLocation,
            &message(MessageKind::Location {
                latitude: 55.0,
                longitude: 37.0,
            }),
        );
        assert_eq!(transition.next, ConversationState::Ended);
        assert_eq!(
            transition.effects,
            vec![Effect::SendForecast(WeatherQuery::Coordinates {
                latitude: 55.0,
                longitude: 37.0,
            })]
        );
    }

    #[test]
    fn test_city_text_requests_city_forecast() {
        let transition = respond(
            &ConversationState::AwaitingLocation,
            &message(MessageKind::Text("Kazan".to_string())),
        );
        assert_eq!(transition.next, ConversationState::Ended);
        assert_eq!(
            transition.effects,
            vec![Effect::SendForecast(WeatherQuery::City("Kazan".to_string()))]
        );
    }

    #[test]
    fn test_unexpected_shape_keeps_state_and_nudges() {
        // A photo sent while a location is expected.
        let transition = respond(
            &ConversationState::AwaitingLocation,
            &message(MessageKind::Photo(vec![photo("p", 10, 10)])),
        );
        assert_eq!(transition.next, ConversationState::AwaitingLocation);
        assert_eq!(
            transition.effects,
            vec![Effect::Reply(text::UNRECOGNIZED.to_string())]
        );
    }

    #[test]
    fn test_ended_hints_at_start() {
        let transition = respond(
            &ConversationState::Ended,
            &message(MessageKind::Text("hello?".to_string())),
        );
        assert_eq!(transition.next, ConversationState::Ended);
        assert_eq!(
            transition.effects,
            vec![Effect::Reply(text::START_HINT.to_string())]
        );
    }

    #[test]
    fn test_cancel_after_end_is_just_a_hint() {
        let transition = respond(
            &ConversationState::Ended,
            &message(MessageKind::Command(Command::Cancel)),
        );
        assert_eq!(transition.next, ConversationState::Ended);
        assert_eq!(
            transition.effects,
            vec![Effect::Reply(text::START_HINT.to_string())]
        );
    }

    #[test]
    fn test_photo_without_variants_is_unrecognized() {
        let transition = respond(
            &ConversationState::AwaitingPhoto,
            &message(MessageKind::Photo(vec![])),
        );
        assert_eq!(transition.next, ConversationState::AwaitingPhoto);
        assert_eq!(
            transition.effects,
            vec![Effect::Reply(text::UNRECOGNIZED.to_string())]
        );
    }
}
