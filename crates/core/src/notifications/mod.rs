//! Notification settings, payloads, channel contracts and the dispatcher.

mod dispatcher;
mod notifications_model;
mod notifications_traits;
mod settings_service;

pub use dispatcher::NotificationDispatcher;
pub use notifications_model::{
    EmergencyAlert, EmergencyKind, NotificationChannel, NotificationSettings,
    NotificationSettingsUpdate, NotificationSettingsView, SymbolChangeBatch,
};
pub use notifications_traits::{
    ChannelConfiguration, EmergencyNotifier, NotificationDispatcherTrait,
    NotificationSettingsRepositoryTrait, NotificationSettingsServiceTrait, SymbolChangeNotifier,
};
pub use settings_service::NotificationSettingsService;
