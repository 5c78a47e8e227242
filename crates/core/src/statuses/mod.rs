//! Status history - the append-only ledger of symbol status transitions.

mod statuses_model;
mod statuses_service;
mod statuses_traits;

pub use statuses_model::{Status, StatusEntry, SymbolHistory};
pub use statuses_service::StatusService;
pub use statuses_traits::{StatusRepositoryTrait, StatusServiceTrait};
