use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use symbolsync_core::notifications::{NotificationSettings, NotificationSettingsRepositoryTrait};
use symbolsync_core::constants::NOTIFICATION_SETTINGS_ID;
use symbolsync_core::Result;

use super::model::NotificationSettingsDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::notification_settings;
use crate::schema::notification_settings::dsl::*;

pub struct NotificationSettingsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl NotificationSettingsRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl NotificationSettingsRepositoryTrait for NotificationSettingsRepository {
    /// Falls back to the defaults when the settings row is missing.
    fn get(&self) -> Result<NotificationSettings> {
        let mut conn = get_connection(&self.pool)?;
        let row = notification_settings
            .find(NOTIFICATION_SETTINGS_ID)
            .select(NotificationSettingsDB::as_select())
            .first::<NotificationSettingsDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(NotificationSettings::from).unwrap_or_default())
    }

    async fn update(&self, settings: NotificationSettings) -> Result<NotificationSettings> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<NotificationSettings> {
                let row = NotificationSettingsDB::from(&settings);
                diesel::insert_into(notification_settings::table)
                    .values(&row)
                    .on_conflict(id)
                    .do_update()
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(settings)
            })
            .await
    }
}
