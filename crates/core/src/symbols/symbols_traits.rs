//! Symbol repository and service traits.
//!
//! These traits define the contract for symbol operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::symbols_model::{AddSymbol, MarketType, Symbol, SymbolStatus};
use crate::errors::Result;
use crate::pagination::Pagination;
use crate::statuses::Status;

/// Trait defining the contract for Symbol repository operations.
#[async_trait]
pub trait SymbolRepositoryTrait: Send + Sync {
    /// Lists the symbols of an exchange ordered by symbol name.
    ///
    /// # Arguments
    /// * `status_filter` - If Some, only symbols currently in that status
    /// * `page` - If Some, only the requested page
    fn list_for_exchange(
        &self,
        exchange_id: &str,
        status_filter: Option<SymbolStatus>,
        page: Option<Pagination>,
    ) -> Result<Vec<Symbol>>;

    /// Lists every symbol of one exchange and market type.
    fn list_for_market(&self, exchange_id: &str, market_type: MarketType) -> Result<Vec<Symbol>>;

    /// Finds symbols by name, optionally narrowed to one market type.
    ///
    /// The same name may exist once per market type, so more than one row
    /// can come back when `market_type` is None.
    fn find_by_name(
        &self,
        exchange_id: &str,
        symbol_name: &str,
        market_type: Option<MarketType>,
    ) -> Result<Vec<Symbol>>;

    /// Inserts a symbol together with its first status row in one transaction.
    async fn insert_with_status(&self, symbol: Symbol, status: Status) -> Result<Symbol>;

    /// Persists a status transition: the symbol's status and timestamp plus the
    /// matching status row, in one transaction.
    async fn update_status(&self, symbol: Symbol, status: Status) -> Result<Symbol>;
}

/// Trait defining the contract for administrative Symbol operations.
#[async_trait]
pub trait SymbolServiceTrait: Send + Sync {
    fn list_symbols(
        &self,
        exchange_name: &str,
        page: Option<Pagination>,
        active_only: bool,
    ) -> Result<Vec<Symbol>>;

    fn get_symbol(
        &self,
        exchange_name: &str,
        symbol_name: &str,
        market_type: Option<MarketType>,
    ) -> Result<Symbol>;

    /// Registers a symbol manually with status `AddedByAdmin`.
    async fn add_symbol(&self, exchange_name: &str, input: AddSymbol) -> Result<Symbol>;

    /// Suppresses a symbol (`RemovedByAdmin`).
    async fn delete_symbol(
        &self,
        exchange_name: &str,
        symbol_name: &str,
        market_type: Option<MarketType>,
    ) -> Result<Symbol>;

    /// Lifts a suppression, moving the symbol back to `AddedByAdmin`.
    async fn revoke_symbol(
        &self,
        exchange_name: &str,
        symbol_name: &str,
        market_type: Option<MarketType>,
    ) -> Result<Symbol>;
}
