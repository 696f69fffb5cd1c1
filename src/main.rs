use std::path::Path;

use anyhow::Result;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use hourcast::bot;
use hourcast::config;
use hourcast::dialogue::{Command, ConversationState};
use hourcast::weather::WeatherClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Hourcast Telegram Bot");

    // Read the bot token from the credentials file
    let config = config::load(Path::new(config::CONFIG_FILE))?;

    // Initialize the bot and the weather client
    let bot = Bot::new(config.api_key);
    let client = WeatherClient::new()?;

    // Surface the command list in the Telegram UI; not fatal if it fails
    if let Err(err) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %err, "Failed to register bot commands");
    }

    info!("Bot initialized, starting dispatcher");

    // Commands go to the command endpoint, everything else to the
    // message endpoint; both share the per-chat dialogue storage.
    let handler = Update::filter_message()
        .enter_dialogue::<Message, InMemStorage<ConversationState>, ConversationState>()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(bot::command_handler),
        )
        .branch(dptree::endpoint(bot::message_handler));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![
            InMemStorage::<ConversationState>::new(),
            client
        ])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
