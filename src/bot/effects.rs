//! Effect execution: the only place the dialogue's side effects touch I/O.

use std::io::Write;

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::FileId;
use tempfile::NamedTempFile;
use tracing::{error, info, warn};

use crate::dialogue::{Effect, PhotoVariant};
use crate::report::build_report;
use crate::weather::WeatherClient;

/// Executes the effects of one transition, in order.
pub async fn execute(
    bot: &Bot,
    msg: &Message,
    client: &WeatherClient,
    effects: Vec<Effect>,
) -> Result<()> {
    for effect in effects {
        match effect {
            Effect::Log(line) => info!(chat_id = %msg.chat.id, "{line}"),
            Effect::Reply(reply) => {
                bot.send_message(msg.chat.id, reply).await?;
            }
            Effect::SavePhoto(variant) => save_photo(bot, msg.chat.id, &variant).await,
            Effect::SendForecast(query) => {
                let bot = bot.clone();
                let client = client.clone();
                let chat_id = msg.chat.id;
                // Own task so a slow provider cannot stall the dispatcher;
                // the conversation has already ended when this runs.
                tokio::spawn(async move {
                    let reply = match build_report(&client, &query).await {
                        Ok(report) => report,
                        Err(err) => {
                            warn!(chat_id = %chat_id, error = %err, "Weather report failed");
                            err.user_message().to_string()
                        }
                    };
                    if let Err(err) = bot.send_message(chat_id, reply).await {
                        error!(chat_id = %chat_id, error = %err, "Failed to deliver weather report");
                    }
                });
            }
        }
    }
    Ok(())
}

/// Downloads the chosen photo variant. A failed download is logged but does
/// not end the conversation; the user can still move on to the location step.
async fn save_photo(bot: &Bot, chat_id: ChatId, variant: &PhotoVariant) {
    match download_file(bot, FileId(variant.file_id.clone())).await {
        Ok(path) => info!(
            chat_id = %chat_id,
            width = variant.width,
            height = variant.height,
            path = %path,
            "Stored user photo"
        ),
        Err(err) => error!(chat_id = %chat_id, error = %err, "Failed to download user photo"),
    }
}

pub async fn download_file(bot: &Bot, file_id: FileId) -> Result<String> {
    let file = bot.get_file(file_id).await?;
    let url = format!(
        "https://api.telegram.org/file/bot{}/{}",
        bot.token(),
        file.path
    );

    let response = reqwest::get(&url).await?;
    let bytes = response.bytes().await?;

    let mut temp_file = NamedTempFile::new()?;
    temp_file.as_file_mut().write_all(&bytes)?;
    // Persist past the handle; the file stays until something cleans it up.
    let path = temp_file.into_temp_path().keep()?;
    Ok(path.to_string_lossy().to_string())
}
