//! Database models for symbols.

use chrono::{NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use symbolsync_core::symbols::{ContractType, MarketType, Symbol, SymbolStatus};

use crate::errors::StorageError;

/// Database model for symbols.
///
/// Decimal limits are stored as TEXT to keep their exact representation.
/// `None` options are written as NULL on update so a dropped delivery date or
/// margin asset is cleared.
#[derive(
    Queryable, Selectable, Insertable, AsChangeset, Identifiable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::symbols)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct SymbolDB {
    pub id: String,
    pub exchange_id: String,
    pub symbol_name: String,
    pub market_type: String,
    pub base_asset: String,
    pub quote_asset: String,
    pub status: String,
    pub price_precision: i32,
    pub quantity_precision: i32,
    pub contract_type: Option<String>,
    pub delivery_date: Option<NaiveDateTime>,
    pub margin_asset: Option<String>,
    pub min_quantity: String,
    pub min_notional: String,
    pub max_quantity: String,
    pub updated_at: NaiveDateTime,
}

fn parse_decimal(column: &str, value: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(value)
        .map_err(|e| StorageError::CorruptRow(format!("symbols.{} '{}': {}", column, value, e)))
}

fn parse_status(value: &str) -> Result<SymbolStatus, StorageError> {
    SymbolStatus::from_db_str(value)
        .ok_or_else(|| StorageError::CorruptRow(format!("unknown symbol status '{}'", value)))
}

impl TryFrom<SymbolDB> for Symbol {
    type Error = StorageError;

    fn try_from(db: SymbolDB) -> Result<Self, Self::Error> {
        let market_type = MarketType::from_db_str(&db.market_type).ok_or_else(|| {
            StorageError::CorruptRow(format!("unknown market type '{}'", db.market_type))
        })?;
        let contract_type = match db.contract_type.as_deref() {
            Some(value) => Some(ContractType::from_db_str(value).ok_or_else(|| {
                StorageError::CorruptRow(format!("unknown contract type '{}'", value))
            })?),
            None => None,
        };

        Ok(Symbol {
            status: parse_status(&db.status)?,
            min_quantity: parse_decimal("min_quantity", &db.min_quantity)?,
            min_notional: parse_decimal("min_notional", &db.min_notional)?,
            max_quantity: parse_decimal("max_quantity", &db.max_quantity)?,
            id: db.id,
            exchange_id: db.exchange_id,
            symbol_name: db.symbol_name,
            market_type,
            base_asset: db.base_asset,
            quote_asset: db.quote_asset,
            price_precision: db.price_precision,
            quantity_precision: db.quantity_precision,
            contract_type,
            delivery_date: db.delivery_date.map(|d| Utc.from_utc_datetime(&d)),
            margin_asset: db.margin_asset,
            updated_at: Utc.from_utc_datetime(&db.updated_at),
        })
    }
}

impl From<&Symbol> for SymbolDB {
    fn from(domain: &Symbol) -> Self {
        Self {
            id: domain.id.clone(),
            exchange_id: domain.exchange_id.clone(),
            symbol_name: domain.symbol_name.clone(),
            market_type: domain.market_type.as_db_str().to_string(),
            base_asset: domain.base_asset.clone(),
            quote_asset: domain.quote_asset.clone(),
            status: domain.status.as_db_str().to_string(),
            price_precision: domain.price_precision,
            quantity_precision: domain.quantity_precision,
            contract_type: domain.contract_type.map(|c| c.as_db_str().to_string()),
            delivery_date: domain.delivery_date.map(|d| d.naive_utc()),
            margin_asset: domain.margin_asset.clone(),
            min_quantity: domain.min_quantity.to_string(),
            min_notional: domain.min_notional.to_string(),
            max_quantity: domain.max_quantity.to_string(),
            updated_at: domain.updated_at.naive_utc(),
        }
    }
}

/// Converts loaded rows, failing on the first row that does not map.
pub(crate) fn into_symbols(rows: Vec<SymbolDB>) -> symbolsync_core::Result<Vec<Symbol>> {
    rows.into_iter()
        .map(|row| Symbol::try_from(row).map_err(Into::into))
        .collect()
}
