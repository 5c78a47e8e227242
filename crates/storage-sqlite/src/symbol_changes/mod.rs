//! Transactional persistence of synchronization results.

mod store;

pub use store::SqliteSymbolChangeStore;
