//! Notification contracts.
//!
//! Concrete channels (Telegram, SMTP) live outside the core crate and plug in
//! through these traits.

use async_trait::async_trait;

use super::notifications_model::{
    EmergencyAlert, NotificationChannel, NotificationSettings, NotificationSettingsUpdate,
    NotificationSettingsView, SymbolChangeBatch,
};
use crate::errors::Result;

#[async_trait]
pub trait NotificationSettingsRepositoryTrait: Send + Sync {
    fn get(&self) -> Result<NotificationSettings>;

    async fn update(&self, settings: NotificationSettings) -> Result<NotificationSettings>;
}

/// Answers whether a channel has the credentials and recipients it needs.
pub trait ChannelConfiguration: Send + Sync {
    fn is_configured(&self, channel: NotificationChannel) -> bool;
}

/// A channel that can deliver the combined change message.
#[async_trait]
pub trait SymbolChangeNotifier: Send + Sync {
    fn channel(&self) -> NotificationChannel;

    async fn send_combined_changes(&self, batch: &SymbolChangeBatch) -> Result<()>;
}

/// A channel that can deliver emergency alerts.
#[async_trait]
pub trait EmergencyNotifier: Send + Sync {
    fn channel(&self) -> NotificationChannel;

    async fn send_emergency(&self, alert: &EmergencyAlert) -> Result<()>;
}

#[async_trait]
pub trait NotificationSettingsServiceTrait: Send + Sync {
    fn get_settings(&self) -> Result<NotificationSettingsView>;

    async fn update_settings(
        &self,
        update: NotificationSettingsUpdate,
    ) -> Result<NotificationSettingsView>;
}

/// Fans messages out to every eligible channel. Delivery is best-effort:
/// implementations log channel failures instead of returning them.
#[async_trait]
pub trait NotificationDispatcherTrait: Send + Sync {
    async fn dispatch_changes(&self, batch: &SymbolChangeBatch);

    async fn dispatch_emergency(&self, alert: &EmergencyAlert);
}
