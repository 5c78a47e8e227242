use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, error, warn};
use std::sync::Arc;

use super::notifications_model::{
    EmergencyAlert, NotificationChannel, NotificationSettings, SymbolChangeBatch,
};
use super::notifications_traits::{
    ChannelConfiguration, EmergencyNotifier, NotificationDispatcherTrait,
    NotificationSettingsRepositoryTrait, SymbolChangeNotifier,
};

/// Sends change batches and emergency alerts to every eligible channel
/// concurrently.
///
/// Change messages go to channels that are switched on in the stored settings
/// and configured. Emergency alerts only require the channel to be configured.
pub struct NotificationDispatcher {
    settings_repository: Arc<dyn NotificationSettingsRepositoryTrait>,
    channels: Arc<dyn ChannelConfiguration>,
    change_notifiers: Vec<Arc<dyn SymbolChangeNotifier>>,
    emergency_notifiers: Vec<Arc<dyn EmergencyNotifier>>,
}

impl NotificationDispatcher {
    pub fn new(
        settings_repository: Arc<dyn NotificationSettingsRepositoryTrait>,
        channels: Arc<dyn ChannelConfiguration>,
        change_notifiers: Vec<Arc<dyn SymbolChangeNotifier>>,
        emergency_notifiers: Vec<Arc<dyn EmergencyNotifier>>,
    ) -> Self {
        Self {
            settings_repository,
            channels,
            change_notifiers,
            emergency_notifiers,
        }
    }

    fn switched_on(settings: &NotificationSettings, channel: NotificationChannel) -> bool {
        match channel {
            NotificationChannel::Telegram => settings.is_telegram_enabled,
            NotificationChannel::Email => settings.is_email_enabled,
            // Alerts are not operator-toggleable.
            NotificationChannel::EmergencyEmail => true,
        }
    }
}

#[async_trait]
impl NotificationDispatcherTrait for NotificationDispatcher {
    async fn dispatch_changes(&self, batch: &SymbolChangeBatch) {
        let settings = match self.settings_repository.get() {
            Ok(settings) => settings,
            Err(e) => {
                error!(
                    "Failed to read notification settings, skipping change notification for {}: {}",
                    batch.exchange_name, e
                );
                return;
            }
        };

        let eligible: Vec<_> = self
            .change_notifiers
            .iter()
            .filter(|n| {
                let channel = n.channel();
                Self::switched_on(&settings, channel) && self.channels.is_configured(channel)
            })
            .collect();
        if eligible.is_empty() {
            debug!(
                "No notification channel enabled for changes on {}",
                batch.exchange_name
            );
            return;
        }

        let results = join_all(eligible.iter().map(|n| n.send_combined_changes(batch))).await;
        for (notifier, result) in eligible.iter().zip(results) {
            if let Err(e) = result {
                warn!(
                    "{} notification for {} ({}) failed: {}",
                    notifier.channel(),
                    batch.exchange_name,
                    batch.market_type,
                    e
                );
            }
        }
    }

    async fn dispatch_emergency(&self, alert: &EmergencyAlert) {
        let eligible: Vec<_> = self
            .emergency_notifiers
            .iter()
            .filter(|n| self.channels.is_configured(n.channel()))
            .collect();
        if eligible.is_empty() {
            warn!(
                "No emergency channel configured; dropping alert: {}: {}",
                alert.kind.title(),
                alert.message
            );
            return;
        }

        let results = join_all(eligible.iter().map(|n| n.send_emergency(alert))).await;
        for (notifier, result) in eligible.iter().zip(results) {
            if let Err(e) = result {
                error!("{} emergency alert failed: {}", notifier.channel(), e);
            }
        }
    }
}
