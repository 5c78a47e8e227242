//! Telegram Bot API channel.

use async_trait::async_trait;
use log::{error, info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use symbolsync_core::notifications::{NotificationChannel, SymbolChangeBatch, SymbolChangeNotifier};
use symbolsync_core::Result;

use crate::config::TelegramOptions;
use crate::errors::NotificationError;
use crate::formatters::{FormatOptions, MarkdownFormatter};

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Telegram rejects longer message texts.
pub const MAX_MESSAGE_LENGTH: usize = 4096;

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Splits `message` into chunks of at most `max_len` characters, breaking
/// after the last newline in the window, else after the last space, else at
/// the limit.
pub(crate) fn split_message(message: &str, max_len: usize) -> Vec<String> {
    let chars: Vec<char> = message.chars().collect();
    if chars.len() <= max_len {
        return vec![message.to_string()];
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let mut end = (start + max_len).min(chars.len());
        if end < chars.len() {
            let window = &chars[start..end];
            let cut = window
                .iter()
                .rposition(|c| *c == '\n')
                .filter(|pos| *pos > 0)
                .or_else(|| window.iter().rposition(|c| *c == ' ').filter(|pos| *pos > 0));
            if let Some(pos) = cut {
                end = start + pos + 1;
            }
        }
        chunks.push(chars[start..end].iter().collect());
        start = end;
    }
    chunks
}

pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    options: TelegramOptions,
    formatter: MarkdownFormatter,
}

impl TelegramNotifier {
    pub fn new(options: TelegramOptions) -> Self {
        Self::with_api_base(options, DEFAULT_API_BASE)
    }

    pub fn with_api_base(options: TelegramOptions, api_base: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        let formatter = MarkdownFormatter::new(FormatOptions {
            include_details: options.include_details,
            max_symbols_per_message: options.max_symbols_per_message,
        });
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            options,
            formatter,
        }
    }

    async fn send_chunk(&self, chat_id: &str, text: &str) -> std::result::Result<(), NotificationError> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.options.bot_token);
        let response = self
            .client
            .post(&url)
            .json(&SendMessageRequest {
                chat_id,
                text,
                parse_mode: "Markdown",
            })
            .send()
            .await
            .map_err(|e| NotificationError::Telegram(e.without_url().to_string()))?;

        let status = response.status();
        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| NotificationError::Telegram(format!("HTTP {}: {}", status, e)))?;
        if !body.ok {
            return Err(NotificationError::Telegram(
                body.description
                    .unwrap_or_else(|| format!("HTTP {}", status)),
            ));
        }
        Ok(())
    }

    /// Sends `message` to every chat. Fails only when no chat received it.
    pub async fn send_message(&self, message: &str) -> std::result::Result<(), NotificationError> {
        if message.is_empty() {
            return Ok(());
        }
        if !self.options.is_valid() {
            return Err(NotificationError::NotConfigured("Telegram".to_string()));
        }

        let chunks = split_message(message, MAX_MESSAGE_LENGTH);
        if chunks.len() > 1 {
            info!("Split Telegram message into {} chunks", chunks.len());
        }

        let mut sent = 0;
        let mut failed = 0;
        for chat_id in self.options.chat_ids.iter().filter(|c| !c.trim().is_empty()) {
            let mut delivered = true;
            for chunk in &chunks {
                if let Err(e) = self.send_chunk(chat_id, chunk).await {
                    error!("Error sending Telegram notification to chat {}: {}", chat_id, e);
                    delivered = false;
                    break;
                }
            }
            if delivered {
                sent += 1;
            } else {
                failed += 1;
            }
        }

        if sent == 0 {
            return Err(NotificationError::Telegram(format!(
                "no chat received the message ({} failed)",
                failed
            )));
        }
        if failed > 0 {
            warn!("Telegram notification reached {} chats, {} failed", sent, failed);
        } else {
            info!("Telegram notification sent to {} chats", sent);
        }
        Ok(())
    }
}

#[async_trait]
impl SymbolChangeNotifier for TelegramNotifier {
    fn channel(&self) -> NotificationChannel {
        NotificationChannel::Telegram
    }

    async fn send_combined_changes(&self, batch: &SymbolChangeBatch) -> Result<()> {
        let message = self.formatter.format_changes(batch);
        Ok(self.send_message(&message).await?)
    }
}
