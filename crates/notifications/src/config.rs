//! Channel credentials and recipients.

use symbolsync_core::notifications::{ChannelConfiguration, NotificationChannel};

pub const DEFAULT_MAX_SYMBOLS_PER_MESSAGE: usize = 50;

fn has_non_blank(values: &[String]) -> bool {
    values.iter().any(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone)]
pub struct TelegramOptions {
    pub bot_token: String,
    pub chat_ids: Vec<String>,
    /// Adds base/quote assets and status under every listed symbol.
    pub include_details: bool,
    pub max_symbols_per_message: usize,
}

impl Default for TelegramOptions {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_ids: Vec::new(),
            include_details: false,
            max_symbols_per_message: DEFAULT_MAX_SYMBOLS_PER_MESSAGE,
        }
    }
}

impl TelegramOptions {
    pub fn is_valid(&self) -> bool {
        !self.bot_token.trim().is_empty() && has_non_blank(&self.chat_ids)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SmtpSettings {
    pub server: String,
    pub port: u16,
    /// Upgrade the connection with STARTTLS.
    pub use_ssl: bool,
    pub sender_email: String,
    pub sender_name: String,
    pub username: String,
    pub password: String,
}

impl SmtpSettings {
    pub fn is_valid(&self) -> bool {
        !self.server.trim().is_empty()
            && self.port > 0
            && !self.sender_email.trim().is_empty()
            && !self.username.trim().is_empty()
            && !self.password.trim().is_empty()
    }
}

/// Everything the notifiers need, as loaded from the environment.
#[derive(Debug, Clone, Default)]
pub struct NotificationChannelConfig {
    pub telegram: TelegramOptions,
    pub smtp: SmtpSettings,
    pub email_recipients: Vec<String>,
    pub emergency_recipients: Vec<String>,
}

impl ChannelConfiguration for NotificationChannelConfig {
    fn is_configured(&self, channel: NotificationChannel) -> bool {
        match channel {
            NotificationChannel::Telegram => self.telegram.is_valid(),
            NotificationChannel::Email => {
                self.smtp.is_valid() && has_non_blank(&self.email_recipients)
            }
            NotificationChannel::EmergencyEmail => {
                self.smtp.is_valid() && has_non_blank(&self.emergency_recipients)
            }
        }
    }
}
