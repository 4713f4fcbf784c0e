//! Telegram Bot API delivery

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info};

use crate::error::{NotifyError, Result};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Response envelope of the Bot API; `description` is set on failure.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

/// Sends formatted message chunks to a single Telegram chat.
pub struct TelegramNotifier {
    client: reqwest::Client,
    api_base: String,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(token: String, chat_id: String) -> Self {
        Self::with_api_base(TELEGRAM_API_BASE.to_string(), token, chat_id)
    }

    /// Points the notifier at an alternate API host (self-hosted Bot
    /// API server, tests).
    pub fn with_api_base(api_base: String, token: String, chat_id: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base,
            token,
            chat_id,
        }
    }

    /// Delivers chunks strictly in order, one API call per chunk.
    /// Stops at the first failure; chunks already sent stay sent.
    /// Returns the number of chunks and change entries delivered.
    pub async fn send_chunks(
        &self,
        chunks: &[String],
        change_count: usize,
    ) -> Result<(usize, usize)> {
        for chunk in chunks {
            self.send_message(chunk).await?;
        }
        info!(
            "Sent {} messages with {} changes",
            chunks.len(),
            change_count
        );
        Ok((chunks.len(), change_count))
    }

    async fn send_message(&self, text: &str) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.token);
        let response = self
            .client
            .post(&url)
            .json(&json!({
                "chat_id": self.chat_id,
                "text": text,
                "parse_mode": "MarkdownV2",
                "disable_web_page_preview": true,
            }))
            .send()
            .await?;

        let status = response.status();
        let api: ApiResponse = response.json().await.unwrap_or(ApiResponse {
            ok: false,
            description: Some(format!("unparseable response (HTTP {})", status)),
        });

        if !api.ok {
            let description = api
                .description
                .unwrap_or_else(|| format!("sendMessage failed (HTTP {})", status));
            error!("Telegram sendMessage failed: {}", description);
            return Err(NotifyError::Telegram(description));
        }

        debug!("Delivered chunk of {} chars", text.chars().count());
        Ok(())
    }
}
