//! Notification settings and message payload models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::symbols::{MarketType, Symbol};

/// A delivery channel operators can be reached through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationChannel {
    Telegram,
    Email,
    EmergencyEmail,
}

impl fmt::Display for NotificationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NotificationChannel::Telegram => "Telegram",
            NotificationChannel::Email => "Email",
            NotificationChannel::EmergencyEmail => "EmergencyEmail",
        };
        f.write_str(name)
    }
}

/// Stored operator toggles, kept in a singleton row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub is_telegram_enabled: bool,
    pub is_email_enabled: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            is_telegram_enabled: true,
            is_email_enabled: true,
        }
    }
}

/// Effective settings: a channel reads as enabled only when it is both
/// switched on and configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettingsView {
    pub is_telegram_enabled: bool,
    pub is_email_enabled: bool,
    pub is_telegram_configured: bool,
    pub is_email_configured: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettingsUpdate {
    pub is_telegram_enabled: bool,
    pub is_email_enabled: bool,
}

impl From<NotificationSettingsUpdate> for NotificationSettings {
    fn from(update: NotificationSettingsUpdate) -> Self {
        Self {
            is_telegram_enabled: update.is_telegram_enabled,
            is_email_enabled: update.is_email_enabled,
        }
    }
}

/// Everything one synchronization run changed, sent as a single message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolChangeBatch {
    pub exchange_name: String,
    pub market_type: MarketType,
    pub new_symbols: Vec<Symbol>,
    pub updated_symbols: Vec<Symbol>,
    pub delisted_symbols: Vec<Symbol>,
    pub occurred_at: DateTime<Utc>,
}

impl SymbolChangeBatch {
    pub fn total_changes(&self) -> usize {
        self.new_symbols.len() + self.updated_symbols.len() + self.delisted_symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_changes() == 0
    }
}

/// Failure class of an emergency alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmergencyKind {
    ExchangeApiError,
    DatabaseError,
    SystemError,
}

impl EmergencyKind {
    pub const fn title(&self) -> &'static str {
        match self {
            EmergencyKind::ExchangeApiError => "Exchange API Error",
            EmergencyKind::DatabaseError => "Database Error",
            EmergencyKind::SystemError => "System Error",
        }
    }
}

/// Operator-facing alert about a failure in the synchronization pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyAlert {
    pub kind: EmergencyKind,
    /// Ordered key/value metadata, e.g. exchange and market type.
    pub context: Vec<(String, String)>,
    pub message: String,
    pub detail: Option<String>,
    pub occurred_at: DateTime<Utc>,
}
