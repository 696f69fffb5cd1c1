//! Bot credentials, read from a JSON file in the working directory.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Default credentials file name.
pub const CONFIG_FILE: &str = "config.json";

/// The credential object. `API_KEY` is the Telegram bot token, held
/// opaquely and handed straight to the transport. Unknown fields are
/// ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(rename = "API_KEY")]
    pub api_key: String,
}

pub fn load(path: &Path) -> Result<Config> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading credentials from {}", path.display()))?;
    let config: Config = serde_json::from_str(&raw)
        .with_context(|| format!("parsing credentials in {}", path.display()))?;
    if config.api_key.trim().is_empty() {
        bail!("API_KEY in {} is empty", path.display());
    }
    Ok(config)
}
