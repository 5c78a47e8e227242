use async_trait::async_trait;

use super::statuses_model::{Status, SymbolHistory};
use crate::errors::Result;
use crate::pagination::Pagination;
use crate::symbols::MarketType;

/// Read access to the append-only status ledger.
///
/// Rows are written together with the symbol they belong to, through
/// `SymbolRepositoryTrait` or the synchronization change store.
pub trait StatusRepositoryTrait: Send + Sync {
    /// Status rows of one symbol, newest first.
    fn list_for_symbol(&self, symbol_id: &str) -> Result<Vec<Status>>;

    /// Status rows of many symbols, newest first within each symbol.
    fn list_for_symbols(&self, symbol_ids: &[String]) -> Result<Vec<Status>>;
}

#[async_trait]
pub trait StatusServiceTrait: Send + Sync {
    fn symbol_history(
        &self,
        exchange_name: &str,
        symbol_name: &str,
        market_type: Option<MarketType>,
    ) -> Result<SymbolHistory>;

    /// Histories of the exchange's symbols, ordered by symbol name.
    fn exchange_history(
        &self,
        exchange_name: &str,
        page: Option<Pagination>,
        active_only: bool,
    ) -> Result<Vec<SymbolHistory>>;
}
