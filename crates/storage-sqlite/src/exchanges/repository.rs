use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use symbolsync_core::exchanges::{Exchange, ExchangeRepositoryTrait, NewExchange};
use symbolsync_core::Result;

use super::model::ExchangeDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::exchanges;
use crate::schema::exchanges::dsl::*;

pub struct ExchangeRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ExchangeRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ExchangeRepositoryTrait for ExchangeRepository {
    fn list(&self) -> Result<Vec<Exchange>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = exchanges
            .order(name.asc())
            .select(ExchangeDB::as_select())
            .load::<ExchangeDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Exchange::from).collect())
    }

    fn get_by_name(&self, exchange_name: &str) -> Result<Option<Exchange>> {
        let mut conn = get_connection(&self.pool)?;
        let row = exchanges
            .filter(name.eq(exchange_name))
            .select(ExchangeDB::as_select())
            .first::<ExchangeDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Exchange::from))
    }

    async fn create(&self, new_exchange: NewExchange) -> Result<Exchange> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Exchange> {
                let row = ExchangeDB {
                    id: Uuid::new_v4().to_string(),
                    name: new_exchange.name,
                    created_at: Utc::now().naive_utc(),
                };
                let inserted = diesel::insert_into(exchanges::table)
                    .values(&row)
                    .returning(ExchangeDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Exchange::from(inserted))
            })
            .await
    }

    async fn delete(&self, exchange_id: &str) -> Result<usize> {
        let exchange_id = exchange_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(exchanges.find(exchange_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
