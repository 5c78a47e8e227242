//! SQLite storage for the symbol catalog.
//!
//! Implements the repository traits declared in `symbolsync-core` with Diesel
//! on top of an r2d2 pool. Reads go through the pool; every write is funneled
//! through a single writer actor so SQLite sees one writer at a time.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

pub mod exchanges;
pub mod notification_settings;
pub mod statuses;
pub mod symbol_changes;
pub mod symbols;

pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};
pub use errors::{IntoCore, StorageError};

pub use exchanges::ExchangeRepository;
pub use notification_settings::NotificationSettingsRepository;
pub use statuses::StatusRepository;
pub use symbol_changes::SqliteSymbolChangeStore;
pub use symbols::SymbolRepository;

pub use symbolsync_core::errors::{DatabaseError, Error, Result};
