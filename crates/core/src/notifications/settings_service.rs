use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use super::notifications_model::{
    NotificationChannel, NotificationSettings, NotificationSettingsUpdate,
    NotificationSettingsView,
};
use super::notifications_traits::{
    ChannelConfiguration, NotificationSettingsRepositoryTrait, NotificationSettingsServiceTrait,
};
use crate::errors::{FieldErrors, Result};

pub struct NotificationSettingsService {
    repository: Arc<dyn NotificationSettingsRepositoryTrait>,
    channels: Arc<dyn ChannelConfiguration>,
}

impl NotificationSettingsService {
    pub fn new(
        repository: Arc<dyn NotificationSettingsRepositoryTrait>,
        channels: Arc<dyn ChannelConfiguration>,
    ) -> Self {
        Self {
            repository,
            channels,
        }
    }

    fn view(&self, stored: NotificationSettings) -> NotificationSettingsView {
        let telegram = self.channels.is_configured(NotificationChannel::Telegram);
        let email = self.channels.is_configured(NotificationChannel::Email);
        NotificationSettingsView {
            is_telegram_enabled: stored.is_telegram_enabled && telegram,
            is_email_enabled: stored.is_email_enabled && email,
            is_telegram_configured: telegram,
            is_email_configured: email,
        }
    }
}

#[async_trait]
impl NotificationSettingsServiceTrait for NotificationSettingsService {
    fn get_settings(&self) -> Result<NotificationSettingsView> {
        let stored = self.repository.get()?;
        Ok(self.view(stored))
    }

    async fn update_settings(
        &self,
        update: NotificationSettingsUpdate,
    ) -> Result<NotificationSettingsView> {
        let mut errors = FieldErrors::default();
        if update.is_telegram_enabled
            && !self.channels.is_configured(NotificationChannel::Telegram)
        {
            errors.add(
                "IsTelegramEnabled",
                "Telegram notifications cannot be enabled because Telegram is not configured.",
            );
        }
        if update.is_email_enabled && !self.channels.is_configured(NotificationChannel::Email) {
            errors.add(
                "IsEmailEnabled",
                "Email notifications cannot be enabled because email is not configured.",
            );
        }
        errors.into_result()?;

        let stored = self.repository.update(update.into()).await?;
        info!(
            "Notification settings updated: telegram={}, email={}",
            stored.is_telegram_enabled, stored.is_email_enabled
        );
        Ok(self.view(stored))
    }
}
