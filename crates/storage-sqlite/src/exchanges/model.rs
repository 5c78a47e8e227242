//! Database models for exchanges.

use chrono::{NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;

use symbolsync_core::exchanges::Exchange;

#[derive(Queryable, Selectable, Insertable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::exchanges)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExchangeDB {
    pub id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

impl From<ExchangeDB> for Exchange {
    fn from(db: ExchangeDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            created_at: Utc.from_utc_datetime(&db.created_at),
        }
    }
}

impl From<Exchange> for ExchangeDB {
    fn from(domain: Exchange) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            created_at: domain.created_at.naive_utc(),
        }
    }
}
