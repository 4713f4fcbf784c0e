pub mod error;
pub mod handlers;
pub mod message;
pub mod telegram;
pub mod utils;
pub mod webhook;

use std::sync::Arc;

use crate::error::NotifyError;
use crate::telegram::TelegramNotifier;

/// Process-wide settings, loaded once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub chat_id: String,
    pub webhook_secret: Option<String>,
    pub port: u16,
}

impl Config {
    /// Reads all settings from environment variables.
    /// Missing required variables are a fatal startup error.
    pub fn from_env() -> Result<Self, NotifyError> {
        let bot_token = require_env("TELEGRAM_BOT_TOKEN")?;
        let chat_id = require_env("TELEGRAM_CHAT_ID")?;

        // An empty secret disables verification, same as an absent one.
        let webhook_secret = std::env::var("WEBHOOK_SECRET")
            .ok()
            .filter(|s| !s.is_empty());

        let port_str = require_env("PORT")?;
        let port: u16 = port_str.parse().map_err(|_| {
            NotifyError::Config(format!("PORT must be a port number, got '{}'", port_str))
        })?;

        Ok(Self {
            bot_token,
            chat_id,
            webhook_secret,
            port,
        })
    }
}

fn require_env(name: &str) -> Result<String, NotifyError> {
    std::env::var(name)
        .map_err(|_| NotifyError::Config(format!("Missing environment variable {}", name)))
}

pub struct AppState {
    pub config: Config,
    pub notifier: TelegramNotifier,
}

pub type SharedState = Arc<AppState>;
