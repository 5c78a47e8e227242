//! SymbolSync Core - Domain entities, services, and traits.
//!
//! This crate contains the symbol catalog domain and the synchronization
//! engine that keeps it in line with exchange feeds. It is database-agnostic
//! and defines traits that are implemented by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod exchanges;
pub mod notifications;
pub mod pagination;
pub mod statuses;
pub mod symbols;
pub mod sync;

#[cfg(test)]
pub(crate) mod test_support;

pub use pagination::Pagination;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
