use std::collections::HashSet;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::{debug, warn};

use symbolsync_core::symbols::SymbolStatus;
use symbolsync_core::sync::{ReconciliationResult, SymbolChangeStore};
use symbolsync_core::Result;

use crate::db::WriteHandle;
use crate::errors::StorageError;
use crate::schema::{statuses, symbols};
use crate::statuses::StatusDB;
use crate::symbols::SymbolDB;

/// Writes a whole [`ReconciliationResult`] as one writer-actor job.
///
/// The actor wraps every job in `BEGIN IMMEDIATE`, so a failure on any row
/// rolls back the symbols and status rows written before it.
///
/// Rows an admin removed after the sync read its state are left alone, and
/// their status rows are dropped from the batch.
pub struct SqliteSymbolChangeStore {
    writer: WriteHandle,
}

impl SqliteSymbolChangeStore {
    pub fn new(writer: WriteHandle) -> Self {
        Self { writer }
    }
}

fn missing_row(symbol_id: &str) -> StorageError {
    debug!("Symbol {} vanished before it could be updated", symbol_id);
    StorageError::QueryFailed(diesel::result::Error::NotFound)
}

const ADMIN_REMOVED: &str = SymbolStatus::RemovedByAdmin.as_db_str();

/// Called when a guarded update matched nothing. `Ok(())` means the row
/// exists but is admin-removed and must be skipped.
fn check_skipped(conn: &mut SqliteConnection, symbol_id: &str) -> Result<()> {
    let exists = diesel::select(diesel::dsl::exists(symbols::table.find(symbol_id)))
        .get_result::<bool>(conn)
        .map_err(StorageError::from)?;
    if !exists {
        return Err(missing_row(symbol_id).into());
    }
    warn!(
        "Symbol {} was removed by an admin during the sync; leaving it untouched",
        symbol_id
    );
    Ok(())
}

#[async_trait]
impl SymbolChangeStore for SqliteSymbolChangeStore {
    async fn persist(&self, result: &ReconciliationResult) -> Result<()> {
        let updated: Vec<SymbolDB> = result.updated_symbols.iter().map(SymbolDB::from).collect();
        let added: Vec<SymbolDB> = result.new_symbols.iter().map(SymbolDB::from).collect();
        let delisted: Vec<SymbolDB> = result.delisted_symbols.iter().map(SymbolDB::from).collect();
        let status_rows: Vec<StatusDB> = result.status_changes.iter().map(StatusDB::from).collect();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let mut skipped: HashSet<&str> = HashSet::new();

                for row in &updated {
                    let affected = diesel::update(
                        symbols::table
                            .find(row.id.as_str())
                            .filter(symbols::status.ne(ADMIN_REMOVED)),
                    )
                    .set(row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                    if affected == 0 {
                        check_skipped(conn, &row.id)?;
                        skipped.insert(row.id.as_str());
                    }
                }

                if !added.is_empty() {
                    diesel::insert_into(symbols::table)
                        .values(&added)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }

                // Delisting only moves the status; the last known metadata stays.
                for row in &delisted {
                    let affected = diesel::update(
                        symbols::table
                            .find(row.id.as_str())
                            .filter(symbols::status.ne(ADMIN_REMOVED)),
                    )
                    .set((
                        symbols::status.eq(&row.status),
                        symbols::updated_at.eq(row.updated_at),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                    if affected == 0 {
                        check_skipped(conn, &row.id)?;
                        skipped.insert(row.id.as_str());
                    }
                }

                let history: Vec<StatusDB> = status_rows
                    .iter()
                    .filter(|s| !skipped.contains(s.symbol_id.as_str()))
                    .cloned()
                    .collect();
                if !history.is_empty() {
                    diesel::insert_into(statuses::table)
                        .values(&history)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }

                debug!(
                    "Persisted {} updated, {} new, {} delisted symbols and {} status rows; {} admin-removed skipped",
                    updated.len(),
                    added.len(),
                    delisted.len(),
                    history.len(),
                    skipped.len()
                );
                Ok(())
            })
            .await
    }
}
