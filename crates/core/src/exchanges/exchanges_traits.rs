//! Exchange repository and service traits.

use async_trait::async_trait;

use super::exchanges_model::{Exchange, NewExchange};
use crate::errors::Result;

/// Trait defining the contract for Exchange repository operations.
#[async_trait]
pub trait ExchangeRepositoryTrait: Send + Sync {
    /// Lists all exchanges ordered by name.
    fn list(&self) -> Result<Vec<Exchange>>;

    /// Looks up an exchange by its unique name.
    fn get_by_name(&self, name: &str) -> Result<Option<Exchange>>;

    /// Inserts a new exchange. Duplicate names surface as a unique violation.
    async fn create(&self, new_exchange: NewExchange) -> Result<Exchange>;

    /// Deletes an exchange and, by cascade, its symbols and their history.
    ///
    /// Returns the number of deleted exchange rows.
    async fn delete(&self, exchange_id: &str) -> Result<usize>;
}

/// Trait defining the contract for Exchange service operations.
#[async_trait]
pub trait ExchangeServiceTrait: Send + Sync {
    fn list_exchanges(&self) -> Result<Vec<Exchange>>;

    /// Returns the exchange or a not-found error.
    fn get_exchange(&self, name: &str) -> Result<Exchange>;

    fn supported_exchanges(&self) -> Vec<String>;

    async fn create_exchange(&self, new_exchange: NewExchange) -> Result<Exchange>;

    async fn delete_exchange(&self, name: &str) -> Result<()>;

    /// Registers every supported exchange that is not present yet.
    ///
    /// Returns the names that were created.
    async fn ensure_supported_exchanges(&self) -> Result<Vec<String>>;
}
