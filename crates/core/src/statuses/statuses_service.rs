use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use super::statuses_model::{Status, StatusEntry, SymbolHistory};
use super::statuses_traits::{StatusRepositoryTrait, StatusServiceTrait};
use crate::errors::Result;
use crate::pagination::Pagination;
use crate::symbols::{MarketType, Symbol, SymbolServiceTrait};

/// Read-only queries over symbol status history.
pub struct StatusService {
    symbol_service: Arc<dyn SymbolServiceTrait>,
    status_repository: Arc<dyn StatusRepositoryTrait>,
}

impl StatusService {
    pub fn new(
        symbol_service: Arc<dyn SymbolServiceTrait>,
        status_repository: Arc<dyn StatusRepositoryTrait>,
    ) -> Self {
        Self {
            symbol_service,
            status_repository,
        }
    }

    fn history_of(symbol: &Symbol, statuses: &[Status]) -> SymbolHistory {
        SymbolHistory {
            symbol_name: symbol.symbol_name.clone(),
            market_type: symbol.market_type,
            history: statuses.iter().map(StatusEntry::from).collect(),
        }
    }
}

#[async_trait]
impl StatusServiceTrait for StatusService {
    fn symbol_history(
        &self,
        exchange_name: &str,
        symbol_name: &str,
        market_type: Option<MarketType>,
    ) -> Result<SymbolHistory> {
        let symbol = self
            .symbol_service
            .get_symbol(exchange_name, symbol_name, market_type)?;
        let statuses = self.status_repository.list_for_symbol(&symbol.id)?;
        Ok(Self::history_of(&symbol, &statuses))
    }

    fn exchange_history(
        &self,
        exchange_name: &str,
        page: Option<Pagination>,
        active_only: bool,
    ) -> Result<Vec<SymbolHistory>> {
        let symbols = self
            .symbol_service
            .list_symbols(exchange_name, page, active_only)?;
        if symbols.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = symbols.iter().map(|s| s.id.clone()).collect();
        let mut by_symbol: HashMap<String, Vec<Status>> = HashMap::new();
        for status in self.status_repository.list_for_symbols(&ids)? {
            by_symbol
                .entry(status.symbol_id.clone())
                .or_default()
                .push(status);
        }

        Ok(symbols
            .iter()
            .map(|symbol| {
                let statuses = by_symbol.remove(&symbol.id).unwrap_or_default();
                Self::history_of(symbol, &statuses)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statuses::StatusEntry;
    use crate::symbols::{AddSymbol, ContractType, SymbolService, SymbolStatus};
    use crate::test_support::InMemoryCatalog;
    use rust_decimal_macros::dec;

    const EXCHANGE: &str = "BinanceUsdtFutures";

    fn input(name: &str) -> AddSymbol {
        AddSymbol {
            symbol_name: name.to_string(),
            market_type: MarketType::UsdtFutures,
            base_asset: "BTC".to_string(),
            quote_asset: "USDT".to_string(),
            price_precision: 1,
            quantity_precision: 3,
            contract_type: Some(ContractType::Perpetual),
            delivery_date: None,
            margin_asset: Some("USDT".to_string()),
            min_quantity: dec!(0.001),
            min_notional: dec!(100),
            max_quantity: dec!(1000),
        }
    }

    #[tokio::test]
    async fn history_is_newest_first() {
        let catalog = Arc::new(InMemoryCatalog::with_exchange(EXCHANGE));
        let symbols = Arc::new(SymbolService::new(catalog.clone(), catalog.clone()));
        let service = StatusService::new(symbols.clone(), catalog.clone());

        symbols.add_symbol(EXCHANGE, input("BTCUSDT")).await.unwrap();
        symbols
            .delete_symbol(EXCHANGE, "BTCUSDT", None)
            .await
            .unwrap();

        let history = service.symbol_history(EXCHANGE, "BTCUSDT", None).unwrap();
        assert_eq!(history.symbol_name, "BTCUSDT");
        assert_eq!(history.market_type, MarketType::UsdtFutures);
        let statuses: Vec<SymbolStatus> = history
            .history
            .iter()
            .map(|e: &StatusEntry| e.symbol_status)
            .collect();
        assert_eq!(
            statuses,
            vec![SymbolStatus::RemovedByAdmin, SymbolStatus::AddedByAdmin]
        );
    }

    #[tokio::test]
    async fn exchange_history_groups_by_symbol() {
        let catalog = Arc::new(InMemoryCatalog::with_exchange(EXCHANGE));
        let symbols = Arc::new(SymbolService::new(catalog.clone(), catalog.clone()));
        let service = StatusService::new(symbols.clone(), catalog.clone());

        for name in ["ETHUSDT", "BTCUSDT"] {
            symbols.add_symbol(EXCHANGE, input(name)).await.unwrap();
        }

        let histories = service.exchange_history(EXCHANGE, None, false).unwrap();
        let names: Vec<&str> = histories.iter().map(|h| h.symbol_name.as_str()).collect();
        assert_eq!(names, vec!["BTCUSDT", "ETHUSDT"]);
        assert!(histories.iter().all(|h| h.history.len() == 1));

        assert!(service.exchange_history(EXCHANGE, None, true).unwrap().is_empty());
    }
}
