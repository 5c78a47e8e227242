use diesel::prelude::*;

use symbolsync_core::constants::NOTIFICATION_SETTINGS_ID;
use symbolsync_core::notifications::NotificationSettings;

/// The singleton settings row seeded by the initial migration.
#[derive(Queryable, Selectable, Insertable, AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::notification_settings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NotificationSettingsDB {
    pub id: String,
    pub is_telegram_enabled: bool,
    pub is_email_enabled: bool,
}

impl From<NotificationSettingsDB> for NotificationSettings {
    fn from(db: NotificationSettingsDB) -> Self {
        Self {
            is_telegram_enabled: db.is_telegram_enabled,
            is_email_enabled: db.is_email_enabled,
        }
    }
}

impl From<&NotificationSettings> for NotificationSettingsDB {
    fn from(domain: &NotificationSettings) -> Self {
        Self {
            id: NOTIFICATION_SETTINGS_ID.to_string(),
            is_telegram_enabled: domain.is_telegram_enabled,
            is_email_enabled: domain.is_email_enabled,
        }
    }
}
