//! Incoming message model: a closed tagged union over the message shapes the
//! dialogue understands, plus the sender identity carried for logging.

use teloxide::utils::command::BotCommands;

/// Commands the bot registers with Telegram.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    #[command(description = "start the conversation")]
    Start,
    #[command(description = "skip sending a photo")]
    Skip,
    #[command(description = "cancel the conversation")]
    Cancel,
}

/// Who sent the message. Read-only identity data used for log lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sender {
    pub id: u64,
    pub first_name: String,
    pub username: Option<String>,
    pub language_code: Option<String>,
}

impl Sender {
    /// One-line identity for log effects.
    pub fn describe(&self) -> String {
        let username = self.username.as_deref().unwrap_or("-");
        let language = self.language_code.as_deref().unwrap_or("-");
        format!(
            "{} (id={}, username={}, lang={})",
            self.first_name, self.id, username, language
        )
    }
}

/// One size variant of a photo attachment. Telegram delivers several
/// resolutions per photo; the dialogue picks the largest one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhotoVariant {
    pub file_id: String,
    pub width: u32,
    pub height: u32,
}

/// The message shapes the dialogue dispatches on. Anything Telegram can
/// deliver that does not fit here (stickers, documents, ...) never reaches
/// the state machine.
#[derive(Clone, Debug, PartialEq)]
pub enum MessageKind {
    Command(Command),
    Text(String),
    Photo(Vec<PhotoVariant>),
    Location { latitude: f64, longitude: f64 },
}

/// A classified inbound message: sender identity plus shape.
#[derive(Clone, Debug, PartialEq)]
pub struct IncomingMessage {
    pub from: Sender,
    pub kind: MessageKind,
}

/// Picks the variant with the largest pixel area, regardless of the order
/// the variants were delivered in. `None` only for an empty slice.
pub fn highest_resolution(variants: &[PhotoVariant]) -> Option<&PhotoVariant> {
    variants
        .iter()
        .max_by_key(|variant| u64::from(variant.width) * u64::from(variant.height))
}
