//! Notification channels for symbol changes and emergency alerts.
//!
//! The core crate decides *whether* a channel is used; this crate knows *how*
//! to reach it: Markdown over the Telegram Bot API and HTML over SMTP.

pub mod config;
pub mod email;
pub mod errors;
pub mod formatters;
pub mod telegram;

pub use config::{NotificationChannelConfig, SmtpSettings, TelegramOptions};
pub use email::{EmailEmergencyNotifier, EmailNotifier, SmtpMailer};
pub use errors::NotificationError;
pub use formatters::{FormatOptions, HtmlEmergencyFormatter, HtmlFormatter, MarkdownFormatter};
pub use telegram::TelegramNotifier;
