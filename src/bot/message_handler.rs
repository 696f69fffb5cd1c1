//! Message Handler module: classifies incoming Telegram messages into the
//! dialogue's message model and drives the state machine.

use anyhow::Result;
use teloxide::prelude::*;
use tracing::debug;

use crate::dialogue::{
    respond, text, Command, IncomingMessage, MessageKind, PhotoVariant, Sender, WeatherDialogue,
};
use crate::weather::WeatherClient;

use super::effects;

/// Endpoint for recognized commands (`/start`, `/skip`, `/cancel`).
pub async fn command_handler(
    bot: Bot,
    msg: Message,
    dialogue: WeatherDialogue,
    client: WeatherClient,
    command: Command,
) -> Result<()> {
    let incoming = IncomingMessage {
        from: sender_of(&msg),
        kind: MessageKind::Command(command),
    };
    drive(&bot, &msg, &dialogue, &client, incoming).await
}

/// Endpoint for every other message. Shapes outside the dialogue's message
/// model (stickers, documents, ...) get the nudge reply directly.
pub async fn message_handler(
    bot: Bot,
    msg: Message,
    dialogue: WeatherDialogue,
    client: WeatherClient,
) -> Result<()> {
    match classify(&msg) {
        Some(kind) => {
            let incoming = IncomingMessage {
                from: sender_of(&msg),
                kind,
            };
            drive(&bot, &msg, &dialogue, &client, incoming).await
        }
        None => {
            debug!(chat_id = %msg.chat.id, "Received message shape the dialogue cannot use");
            bot.send_message(msg.chat.id, text::UNRECOGNIZED).await?;
            Ok(())
        }
    }
}

/// Runs one step: look up the state, apply the transition, execute the
/// effects, write the next state back. On `Ended` the stored entry is
/// removed rather than kept, so an idle chat leaves nothing behind.
async fn drive(
    bot: &Bot,
    msg: &Message,
    dialogue: &WeatherDialogue,
    client: &WeatherClient,
    incoming: IncomingMessage,
) -> Result<()> {
    let stored = dialogue.get().await?;
    let state = stored.clone().unwrap_or_default();

    let transition = respond(&state, &incoming);
    debug!(
        chat_id = %msg.chat.id,
        from = ?state,
        to = ?transition.next,
        "Dialogue transition"
    );

    effects::execute(bot, msg, client, transition.effects).await?;

    if transition.next.is_terminal() {
        if stored.is_some() {
            dialogue.exit().await?;
        }
    } else {
        dialogue.update(transition.next).await?;
    }
    Ok(())
}

fn classify(msg: &Message) -> Option<MessageKind> {
    if let Some(location) = msg.location() {
        return Some(MessageKind::Location {
            latitude: location.latitude,
            longitude: location.longitude,
        });
    }
    if let Some(photos) = msg.photo() {
        let variants = photos
            .iter()
            .map(|photo| PhotoVariant {
                file_id: photo.file.id.0.clone(),
                width: photo.width,
                height: photo.height,
            })
            .collect();
        return Some(MessageKind::Photo(variants));
    }
    if let Some(message_text) = msg.text() {
        return Some(MessageKind::Text(message_text.to_string()));
    }
    None
}

fn sender_of(msg: &Message) -> Sender {
    match msg.from.as_ref() {
        Some(user) => Sender {
            id: user.id.0,
            first_name: user.first_name.clone(),
            username: user.username.clone(),
            language_code: user.language_code.clone(),
        },
        // Channel posts and the like carry no sender.
        None => Sender {
            id: 0,
            first_name: "unknown".to_string(),
            username: None,
            language_code: None,
        },
    }
}
