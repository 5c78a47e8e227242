//! In-memory repositories shared by service and synchronization tests.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;

use crate::errors::{DatabaseError, Error, Result};
use crate::exchanges::{Exchange, ExchangeRepositoryTrait, NewExchange};
use crate::pagination::Pagination;
use crate::statuses::{Status, StatusRepositoryTrait};
use crate::symbols::{MarketType, Symbol, SymbolRepositoryTrait, SymbolStatus};
use crate::sync::{ReconciliationResult, SymbolChangeStore};

#[derive(Default)]
pub struct InMemoryCatalog {
    pub exchanges: Mutex<Vec<Exchange>>,
    pub symbols: Mutex<Vec<Symbol>>,
    pub statuses: Mutex<Vec<Status>>,
    pub persist_calls: Mutex<usize>,
    pub fail_persist: Mutex<bool>,
    pub fail_reads: Mutex<bool>,
}

impl InMemoryCatalog {
    pub fn with_exchange(name: &str) -> Self {
        let catalog = Self::default();
        catalog.exchanges.lock().unwrap().push(Exchange {
            id: format!("{}-id", name),
            name: name.to_string(),
            created_at: Utc::now(),
        });
        catalog
    }

    pub fn exchange_id(&self, name: &str) -> String {
        self.exchanges
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.id.clone())
            .unwrap()
    }

    pub fn symbol(&self, name: &str, market_type: MarketType) -> Option<Symbol> {
        self.symbols
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.symbol_name == name && s.market_type == market_type)
            .cloned()
    }

    pub fn statuses_of(&self, symbol_id: &str) -> Vec<SymbolStatus> {
        self.statuses
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.symbol_id == symbol_id)
            .map(|s| s.symbol_status)
            .collect()
    }

    fn check_reads(&self) -> Result<()> {
        if *self.fail_reads.lock().unwrap() {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "no such table: symbols".to_string(),
            )));
        }
        Ok(())
    }

    fn upsert(&self, symbol: Symbol) {
        let mut symbols = self.symbols.lock().unwrap();
        match symbols.iter_mut().find(|s| s.id == symbol.id) {
            Some(existing) => *existing = symbol,
            None => symbols.push(symbol),
        }
    }
}

#[async_trait]
impl ExchangeRepositoryTrait for InMemoryCatalog {
    fn list(&self) -> Result<Vec<Exchange>> {
        let mut exchanges = self.exchanges.lock().unwrap().clone();
        exchanges.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(exchanges)
    }

    fn get_by_name(&self, name: &str) -> Result<Option<Exchange>> {
        self.check_reads()?;
        Ok(self
            .exchanges
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.name == name)
            .cloned())
    }

    async fn create(&self, new_exchange: NewExchange) -> Result<Exchange> {
        let mut exchanges = self.exchanges.lock().unwrap();
        if exchanges.iter().any(|e| e.name == new_exchange.name) {
            return Err(Error::Database(DatabaseError::UniqueViolation(
                "exchanges.name".to_string(),
            )));
        }
        let exchange = Exchange {
            id: format!("{}-id", new_exchange.name),
            name: new_exchange.name,
            created_at: Utc::now(),
        };
        exchanges.push(exchange.clone());
        Ok(exchange)
    }

    async fn delete(&self, exchange_id: &str) -> Result<usize> {
        let mut exchanges = self.exchanges.lock().unwrap();
        let before = exchanges.len();
        exchanges.retain(|e| e.id != exchange_id);
        self.symbols
            .lock()
            .unwrap()
            .retain(|s| s.exchange_id != exchange_id);
        Ok(before - exchanges.len())
    }
}

#[async_trait]
impl SymbolRepositoryTrait for InMemoryCatalog {
    fn list_for_exchange(
        &self,
        exchange_id: &str,
        status_filter: Option<SymbolStatus>,
        page: Option<Pagination>,
    ) -> Result<Vec<Symbol>> {
        let mut symbols: Vec<Symbol> = self
            .symbols
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.exchange_id == exchange_id)
            .filter(|s| status_filter.map_or(true, |status| s.status == status))
            .cloned()
            .collect();
        symbols.sort_by(|a, b| a.symbol_name.cmp(&b.symbol_name));
        Ok(match page {
            Some(page) => page.slice(&symbols),
            None => symbols,
        })
    }

    fn list_for_market(&self, exchange_id: &str, market_type: MarketType) -> Result<Vec<Symbol>> {
        self.check_reads()?;
        Ok(self
            .symbols
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.exchange_id == exchange_id && s.market_type == market_type)
            .cloned()
            .collect())
    }

    fn find_by_name(
        &self,
        exchange_id: &str,
        symbol_name: &str,
        market_type: Option<MarketType>,
    ) -> Result<Vec<Symbol>> {
        Ok(self
            .symbols
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.exchange_id == exchange_id && s.symbol_name == symbol_name)
            .filter(|s| market_type.map_or(true, |m| s.market_type == m))
            .cloned()
            .collect())
    }

    async fn insert_with_status(&self, symbol: Symbol, status: Status) -> Result<Symbol> {
        if self
            .symbol(&symbol.symbol_name, symbol.market_type)
            .is_some_and(|s| s.exchange_id == symbol.exchange_id)
        {
            return Err(Error::Database(DatabaseError::UniqueViolation(
                "symbols.exchange_id, symbols.symbol_name, symbols.market_type".to_string(),
            )));
        }
        self.upsert(symbol.clone());
        self.statuses.lock().unwrap().push(status);
        Ok(symbol)
    }

    async fn update_status(&self, symbol: Symbol, status: Status) -> Result<Symbol> {
        self.upsert(symbol.clone());
        self.statuses.lock().unwrap().push(status);
        Ok(symbol)
    }
}

impl StatusRepositoryTrait for InMemoryCatalog {
    fn list_for_symbol(&self, symbol_id: &str) -> Result<Vec<Status>> {
        self.list_for_symbols(&[symbol_id.to_string()])
    }

    fn list_for_symbols(&self, symbol_ids: &[String]) -> Result<Vec<Status>> {
        let mut statuses: Vec<Status> = self
            .statuses
            .lock()
            .unwrap()
            .iter()
            .filter(|s| symbol_ids.contains(&s.symbol_id))
            .cloned()
            .collect();
        statuses.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(statuses)
    }
}

#[async_trait]
impl SymbolChangeStore for InMemoryCatalog {
    async fn persist(&self, result: &ReconciliationResult) -> Result<()> {
        *self.persist_calls.lock().unwrap() += 1;
        if *self.fail_persist.lock().unwrap() {
            return Err(Error::Database(DatabaseError::TransactionFailed(
                "database is locked".to_string(),
            )));
        }
        for symbol in result
            .updated_symbols
            .iter()
            .chain(&result.new_symbols)
            .chain(&result.delisted_symbols)
        {
            self.upsert(symbol.clone());
        }
        self.statuses
            .lock()
            .unwrap()
            .extend(result.status_changes.iter().cloned());
        Ok(())
    }
}
