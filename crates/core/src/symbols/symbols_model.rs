//! Symbol domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{MAX_ASSET_CODE_LENGTH, MAX_SYMBOL_NAME_LENGTH};
use crate::errors::{Error, FieldErrors, Result, ValidationError};

/// Trading venue category. Partitions the symbol namespace of an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketType {
    Spot,
    UsdtFutures,
    CoinFutures,
}

impl MarketType {
    pub const ALL: [MarketType; 3] = [
        MarketType::Spot,
        MarketType::UsdtFutures,
        MarketType::CoinFutures,
    ];

    /// Returns the database string representation.
    pub const fn as_db_str(&self) -> &'static str {
        match self {
            MarketType::Spot => "Spot",
            MarketType::UsdtFutures => "UsdtFutures",
            MarketType::CoinFutures => "CoinFutures",
        }
    }

    /// Parses a market type from its database string.
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Spot" => Some(MarketType::Spot),
            "UsdtFutures" => Some(MarketType::UsdtFutures),
            "CoinFutures" => Some(MarketType::CoinFutures),
            _ => None,
        }
    }
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_db_str())
    }
}

impl FromStr for MarketType {
    type Err = Error;

    /// Accepts the canonical name in any letter case.
    fn from_str(s: &str) -> Result<Self> {
        MarketType::ALL
            .into_iter()
            .find(|m| m.as_db_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::Validation(ValidationError::InvalidInput(format!(
                    "Unknown market type '{}'",
                    s
                )))
            })
    }
}

/// Lifecycle state of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolStatus {
    /// Trading normally.
    Active,
    /// Temporarily halted (halt, break or end of day on the exchange).
    Suspended,
    /// Announced but not trading yet.
    PreLaunch,
    /// Gone from the exchange feed.
    Delisted,
    Expired,
    Settling,
    /// Created manually, not yet confirmed by the exchange feed.
    AddedByAdmin,
    /// Suppressed manually. Synchronization never touches these.
    RemovedByAdmin,
}

impl SymbolStatus {
    pub const fn as_db_str(&self) -> &'static str {
        match self {
            SymbolStatus::Active => "Active",
            SymbolStatus::Suspended => "Suspended",
            SymbolStatus::PreLaunch => "PreLaunch",
            SymbolStatus::Delisted => "Delisted",
            SymbolStatus::Expired => "Expired",
            SymbolStatus::Settling => "Settling",
            SymbolStatus::AddedByAdmin => "AddedByAdmin",
            SymbolStatus::RemovedByAdmin => "RemovedByAdmin",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Active" => Some(SymbolStatus::Active),
            "Suspended" => Some(SymbolStatus::Suspended),
            "PreLaunch" => Some(SymbolStatus::PreLaunch),
            "Delisted" => Some(SymbolStatus::Delisted),
            "Expired" => Some(SymbolStatus::Expired),
            "Settling" => Some(SymbolStatus::Settling),
            "AddedByAdmin" => Some(SymbolStatus::AddedByAdmin),
            "RemovedByAdmin" => Some(SymbolStatus::RemovedByAdmin),
            _ => None,
        }
    }
}

impl fmt::Display for SymbolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_db_str())
    }
}

/// Futures contract kind; `Spot` for spot instruments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractType {
    Spot,
    Perpetual,
    CurrentQuarter,
    NextQuarter,
}

impl ContractType {
    pub const fn as_db_str(&self) -> &'static str {
        match self {
            ContractType::Spot => "Spot",
            ContractType::Perpetual => "Perpetual",
            ContractType::CurrentQuarter => "CurrentQuarter",
            ContractType::NextQuarter => "NextQuarter",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Spot" => Some(ContractType::Spot),
            "Perpetual" => Some(ContractType::Perpetual),
            "CurrentQuarter" => Some(ContractType::CurrentQuarter),
            "NextQuarter" => Some(ContractType::NextQuarter),
            _ => None,
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_db_str())
    }
}

/// Domain model representing a tradable instrument on one exchange and market type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    pub id: String,
    pub exchange_id: String,
    pub symbol_name: String,
    pub market_type: MarketType,
    pub base_asset: String,
    pub quote_asset: String,
    pub status: SymbolStatus,
    pub price_precision: i32,
    pub quantity_precision: i32,
    pub contract_type: Option<ContractType>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub margin_asset: Option<String>,
    pub min_quantity: Decimal,
    pub min_notional: Decimal,
    pub max_quantity: Decimal,
    pub updated_at: DateTime<Utc>,
}

/// Input model for manually registering a symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSymbol {
    pub symbol_name: String,
    pub market_type: MarketType,
    pub base_asset: String,
    pub quote_asset: String,
    pub price_precision: i32,
    pub quantity_precision: i32,
    pub contract_type: Option<ContractType>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub margin_asset: Option<String>,
    pub min_quantity: Decimal,
    pub min_notional: Decimal,
    pub max_quantity: Decimal,
}

fn check_code(errors: &mut FieldErrors, field: &str, value: &str, max_len: usize) {
    if value.trim().is_empty() {
        errors.add(field, format!("{} must not be empty.", field));
    } else if value.chars().count() > max_len {
        errors.add(
            field,
            format!("{} must not exceed {} characters.", field, max_len),
        );
    }
}

impl AddSymbol {
    /// Validates the input, collecting every failing field.
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::default();

        check_code(
            &mut errors,
            "SymbolName",
            &self.symbol_name,
            MAX_SYMBOL_NAME_LENGTH,
        );
        check_code(
            &mut errors,
            "BaseAsset",
            &self.base_asset,
            MAX_ASSET_CODE_LENGTH,
        );
        check_code(
            &mut errors,
            "QuoteAsset",
            &self.quote_asset,
            MAX_ASSET_CODE_LENGTH,
        );
        if let Some(margin_asset) = &self.margin_asset {
            check_code(
                &mut errors,
                "MarginAsset",
                margin_asset,
                MAX_ASSET_CODE_LENGTH,
            );
        }

        if self.price_precision < 0 {
            errors.add("PricePrecision", "PricePrecision must be non-negative.");
        }
        if self.quantity_precision < 0 {
            errors.add(
                "QuantityPrecision",
                "QuantityPrecision must be non-negative.",
            );
        }
        if self.min_quantity <= Decimal::ZERO {
            errors.add("MinQuantity", "MinQuantity must be greater than 0.");
        }
        if self.min_notional < Decimal::ZERO {
            errors.add("MinNotional", "MinNotional must be non-negative.");
        }
        if self.max_quantity <= Decimal::ZERO {
            errors.add("MaxQuantity", "MaxQuantity must be greater than 0.");
        } else if self.max_quantity < self.min_quantity {
            errors.add(
                "MaxQuantity",
                "MaxQuantity must be greater than or equal to MinQuantity.",
            );
        }

        errors.into_result()
    }
}
