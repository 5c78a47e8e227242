use async_trait::async_trait;
use chrono::Utc;
use log::info;
use std::sync::Arc;
use uuid::Uuid;

use super::symbols_model::{AddSymbol, MarketType, Symbol, SymbolStatus};
use super::symbols_traits::{SymbolRepositoryTrait, SymbolServiceTrait};
use crate::errors::{DatabaseError, Error, Result};
use crate::exchanges::{Exchange, ExchangeRepositoryTrait};
use crate::pagination::Pagination;
use crate::statuses::Status;

/// Administrative operations on symbols.
pub struct SymbolService {
    exchange_repository: Arc<dyn ExchangeRepositoryTrait>,
    symbol_repository: Arc<dyn SymbolRepositoryTrait>,
}

impl SymbolService {
    pub fn new(
        exchange_repository: Arc<dyn ExchangeRepositoryTrait>,
        symbol_repository: Arc<dyn SymbolRepositoryTrait>,
    ) -> Self {
        Self {
            exchange_repository,
            symbol_repository,
        }
    }

    fn exchange(&self, name: &str) -> Result<Exchange> {
        self.exchange_repository
            .get_by_name(name)?
            .ok_or_else(|| Error::not_found("Exchange", name))
    }

    fn resolve(
        &self,
        exchange: &Exchange,
        symbol_name: &str,
        market_type: Option<MarketType>,
    ) -> Result<Symbol> {
        let mut matches =
            self.symbol_repository
                .find_by_name(&exchange.id, symbol_name, market_type)?;
        match matches.len() {
            0 => Err(Error::not_found(
                "Symbol",
                format!("{} on exchange {}", symbol_name, exchange.name),
            )),
            1 => Ok(matches.remove(0)),
            _ => Err(Error::field(
                "MarketType",
                format!(
                    "Symbol {} exists in several market types; specify marketType.",
                    symbol_name
                ),
            )),
        }
    }

    async fn transition(&self, mut symbol: Symbol, status: SymbolStatus) -> Result<Symbol> {
        let now = Utc::now();
        symbol.status = status;
        symbol.updated_at = now;
        let record = Status::record(symbol.id.clone(), status, now);
        self.symbol_repository.update_status(symbol, record).await
    }
}

#[async_trait]
impl SymbolServiceTrait for SymbolService {
    fn list_symbols(
        &self,
        exchange_name: &str,
        page: Option<Pagination>,
        active_only: bool,
    ) -> Result<Vec<Symbol>> {
        let exchange = self.exchange(exchange_name)?;
        let status_filter = active_only.then_some(SymbolStatus::Active);
        self.symbol_repository
            .list_for_exchange(&exchange.id, status_filter, page)
    }

    fn get_symbol(
        &self,
        exchange_name: &str,
        symbol_name: &str,
        market_type: Option<MarketType>,
    ) -> Result<Symbol> {
        let exchange = self.exchange(exchange_name)?;
        self.resolve(&exchange, symbol_name, market_type)
    }

    async fn add_symbol(&self, exchange_name: &str, input: AddSymbol) -> Result<Symbol> {
        input.validate()?;
        let exchange = self.exchange(exchange_name)?;

        let existing = self.symbol_repository.find_by_name(
            &exchange.id,
            &input.symbol_name,
            Some(input.market_type),
        )?;
        if !existing.is_empty() {
            return Err(Error::field("Symbol", "Symbol already exists"));
        }

        let now = Utc::now();
        let symbol = Symbol {
            id: Uuid::new_v4().to_string(),
            exchange_id: exchange.id.clone(),
            symbol_name: input.symbol_name,
            market_type: input.market_type,
            base_asset: input.base_asset,
            quote_asset: input.quote_asset,
            status: SymbolStatus::AddedByAdmin,
            price_precision: input.price_precision,
            quantity_precision: input.quantity_precision,
            contract_type: input.contract_type,
            delivery_date: input.delivery_date,
            margin_asset: input.margin_asset,
            min_quantity: input.min_quantity,
            min_notional: input.min_notional,
            max_quantity: input.max_quantity,
            updated_at: now,
        };
        let record = Status::record(symbol.id.clone(), SymbolStatus::AddedByAdmin, now);

        match self
            .symbol_repository
            .insert_with_status(symbol, record)
            .await
        {
            Ok(symbol) => {
                info!(
                    "Admin added symbol {} ({}) on {}",
                    symbol.symbol_name, symbol.market_type, exchange.name
                );
                Ok(symbol)
            }
            Err(Error::Database(DatabaseError::UniqueViolation(_))) => {
                Err(Error::field("Symbol", "Symbol already exists"))
            }
            Err(e) => Err(e),
        }
    }

    async fn delete_symbol(
        &self,
        exchange_name: &str,
        symbol_name: &str,
        market_type: Option<MarketType>,
    ) -> Result<Symbol> {
        let exchange = self.exchange(exchange_name)?;
        let symbol = self.resolve(&exchange, symbol_name, market_type)?;

        if symbol.status == SymbolStatus::RemovedByAdmin {
            return Err(Error::field("Symbol", "Symbol is already removed by admin"));
        }

        let symbol = self.transition(symbol, SymbolStatus::RemovedByAdmin).await?;
        info!(
            "Admin removed symbol {} ({}) on {}",
            symbol.symbol_name, symbol.market_type, exchange.name
        );
        Ok(symbol)
    }

    async fn revoke_symbol(
        &self,
        exchange_name: &str,
        symbol_name: &str,
        market_type: Option<MarketType>,
    ) -> Result<Symbol> {
        let exchange = self.exchange(exchange_name)?;
        let symbol = self.resolve(&exchange, symbol_name, market_type)?;

        if symbol.status != SymbolStatus::RemovedByAdmin {
            return Err(Error::field(
                "Symbol",
                "Only symbols with RemovedByAdmin status can be revoked",
            ));
        }

        let symbol = self.transition(symbol, SymbolStatus::AddedByAdmin).await?;
        info!(
            "Admin revoked removal of symbol {} ({}) on {}",
            symbol.symbol_name, symbol.market_type, exchange.name
        );
        Ok(symbol)
    }
}
