use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use symbolsync_core::pagination::Pagination;
use symbolsync_core::statuses::Status;
use symbolsync_core::symbols::{MarketType, Symbol, SymbolRepositoryTrait, SymbolStatus};
use symbolsync_core::Result;

use super::model::{into_symbols, SymbolDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{statuses, symbols};
use crate::statuses::StatusDB;

pub struct SymbolRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SymbolRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl SymbolRepositoryTrait for SymbolRepository {
    fn list_for_exchange(
        &self,
        exchange_id: &str,
        status_filter: Option<SymbolStatus>,
        page: Option<Pagination>,
    ) -> Result<Vec<Symbol>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = symbols::table
            .filter(symbols::exchange_id.eq(exchange_id))
            .select(SymbolDB::as_select())
            .order((symbols::symbol_name.asc(), symbols::market_type.asc()))
            .into_boxed();
        if let Some(status) = status_filter {
            query = query.filter(symbols::status.eq(status.as_db_str()));
        }
        if let Some(page) = page {
            query = query.limit(page.page_size()).offset(page.offset());
        }

        let rows = query
            .load::<SymbolDB>(&mut conn)
            .map_err(StorageError::from)?;
        into_symbols(rows)
    }

    fn list_for_market(&self, exchange_id: &str, market_type: MarketType) -> Result<Vec<Symbol>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = symbols::table
            .filter(symbols::exchange_id.eq(exchange_id))
            .filter(symbols::market_type.eq(market_type.as_db_str()))
            .select(SymbolDB::as_select())
            .load::<SymbolDB>(&mut conn)
            .map_err(StorageError::from)?;
        into_symbols(rows)
    }

    fn find_by_name(
        &self,
        exchange_id: &str,
        symbol_name: &str,
        market_type: Option<MarketType>,
    ) -> Result<Vec<Symbol>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = symbols::table
            .filter(symbols::exchange_id.eq(exchange_id))
            .filter(symbols::symbol_name.eq(symbol_name))
            .select(SymbolDB::as_select())
            .order(symbols::market_type.asc())
            .into_boxed();
        if let Some(market_type) = market_type {
            query = query.filter(symbols::market_type.eq(market_type.as_db_str()));
        }

        let rows = query
            .load::<SymbolDB>(&mut conn)
            .map_err(StorageError::from)?;
        into_symbols(rows)
    }

    async fn insert_with_status(&self, symbol: Symbol, status: Status) -> Result<Symbol> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Symbol> {
                diesel::insert_into(symbols::table)
                    .values(SymbolDB::from(&symbol))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                diesel::insert_into(statuses::table)
                    .values(StatusDB::from(&status))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(symbol)
            })
            .await
    }

    async fn update_status(&self, symbol: Symbol, status: Status) -> Result<Symbol> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Symbol> {
                let updated = diesel::update(symbols::table.find(symbol.id.as_str()))
                    .set((
                        symbols::status.eq(symbol.status.as_db_str()),
                        symbols::updated_at.eq(symbol.updated_at.naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if updated == 0 {
                    return Err(StorageError::QueryFailed(diesel::result::Error::NotFound).into());
                }
                diesel::insert_into(statuses::table)
                    .values(StatusDB::from(&status))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(symbol)
            })
            .await
    }
}
