use chrono::{NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;

use symbolsync_core::statuses::Status;
use symbolsync_core::symbols::SymbolStatus;

use crate::errors::StorageError;

#[derive(Queryable, Selectable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::statuses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StatusDB {
    pub id: String,
    pub symbol_id: String,
    pub symbol_status: String,
    pub created_at: NaiveDateTime,
}

impl From<&Status> for StatusDB {
    fn from(domain: &Status) -> Self {
        Self {
            id: domain.id.clone(),
            symbol_id: domain.symbol_id.clone(),
            symbol_status: domain.symbol_status.as_db_str().to_string(),
            created_at: domain.created_at.naive_utc(),
        }
    }
}

impl TryFrom<StatusDB> for Status {
    type Error = StorageError;

    fn try_from(db: StatusDB) -> Result<Self, Self::Error> {
        let symbol_status = SymbolStatus::from_db_str(&db.symbol_status).ok_or_else(|| {
            StorageError::CorruptRow(format!("unknown symbol status '{}'", db.symbol_status))
        })?;
        Ok(Status {
            id: db.id,
            symbol_id: db.symbol_id,
            symbol_status,
            created_at: Utc.from_utc_datetime(&db.created_at),
        })
    }
}
