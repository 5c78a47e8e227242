use diesel::prelude::*;
use std::sync::Arc;

use symbolsync_core::statuses::{Status, StatusRepositoryTrait};
use symbolsync_core::Result;

use super::model::StatusDB;
use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;
use crate::schema::statuses::dsl::*;
use crate::utils::chunk_for_sqlite;

/// Reads the status ledger. Rows are inserted by the symbol repository and
/// the change store inside their own write transactions.
pub struct StatusRepository {
    pool: Arc<DbPool>,
}

impl StatusRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

fn into_statuses(rows: Vec<StatusDB>) -> Result<Vec<Status>> {
    rows.into_iter()
        .map(|row| Status::try_from(row).map_err(Into::into))
        .collect()
}

impl StatusRepositoryTrait for StatusRepository {
    fn list_for_symbol(&self, target_symbol_id: &str) -> Result<Vec<Status>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = statuses
            .filter(symbol_id.eq(target_symbol_id))
            .order((created_at.desc(), id.desc()))
            .select(StatusDB::as_select())
            .load::<StatusDB>(&mut conn)
            .into_core()?;
        into_statuses(rows)
    }

    fn list_for_symbols(&self, symbol_ids: &[String]) -> Result<Vec<Status>> {
        if symbol_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = get_connection(&self.pool)?;

        let mut rows = Vec::new();
        for chunk in chunk_for_sqlite(symbol_ids) {
            let loaded = statuses
                .filter(symbol_id.eq_any(chunk))
                .order((created_at.desc(), id.desc()))
                .select(StatusDB::as_select())
                .load::<StatusDB>(&mut conn)
                .into_core()?;
            rows.extend(loaded);
        }
        // Chunks are ordered individually.
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        into_statuses(rows)
    }
}
