//! Canonical symbol shape and the pure mapping rules applied to exchange data.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::symbols::{ContractType, MarketType, Symbol, SymbolStatus};

/// One instrument as reported by an exchange, already mapped to catalog terms.
///
/// Quantity and notional limits are `None` when the exchange omitted the
/// filter block carrying them.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolFields {
    pub symbol_name: String,
    pub market_type: MarketType,
    pub base_asset: String,
    pub quote_asset: String,
    pub status: SymbolStatus,
    pub contract_type: ContractType,
    pub delivery_date: Option<DateTime<Utc>>,
    pub margin_asset: Option<String>,
    pub price_precision: i32,
    pub quantity_precision: i32,
    pub min_quantity: Option<Decimal>,
    pub max_quantity: Option<Decimal>,
    pub min_notional: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolField {
    MarketType,
    BaseAsset,
    QuoteAsset,
    Status,
    ContractType,
    DeliveryDate,
    MarginAsset,
    PricePrecision,
    QuantityPrecision,
    MinQuantity,
    MaxQuantity,
    MinNotional,
}

/// Fields that differ between a stored symbol and its incoming record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolDiff {
    changed: Vec<SymbolField>,
}

impl SymbolDiff {
    pub fn is_changed(&self) -> bool {
        !self.changed.is_empty()
    }

    pub fn status_changed(&self) -> bool {
        self.contains(SymbolField::Status)
    }

    pub fn contains(&self, field: SymbolField) -> bool {
        self.changed.contains(&field)
    }

    pub fn fields(&self) -> &[SymbolField] {
        &self.changed
    }
}

/// Compares `current` with `incoming` field by field.
///
/// Absent limits never count as a change.
pub fn diff(current: &Symbol, incoming: &SymbolFields) -> SymbolDiff {
    let mut changed = Vec::new();
    let mut check = |differs: bool, field: SymbolField| {
        if differs {
            changed.push(field);
        }
    };

    check(current.market_type != incoming.market_type, SymbolField::MarketType);
    check(current.base_asset != incoming.base_asset, SymbolField::BaseAsset);
    check(current.quote_asset != incoming.quote_asset, SymbolField::QuoteAsset);
    check(current.status != incoming.status, SymbolField::Status);
    check(
        current.contract_type != Some(incoming.contract_type),
        SymbolField::ContractType,
    );
    check(
        current.delivery_date != incoming.delivery_date,
        SymbolField::DeliveryDate,
    );
    check(
        current.margin_asset != incoming.margin_asset,
        SymbolField::MarginAsset,
    );
    check(
        current.price_precision != incoming.price_precision,
        SymbolField::PricePrecision,
    );
    check(
        current.quantity_precision != incoming.quantity_precision,
        SymbolField::QuantityPrecision,
    );
    check(
        incoming
            .min_quantity
            .is_some_and(|v| v != current.min_quantity),
        SymbolField::MinQuantity,
    );
    check(
        incoming
            .max_quantity
            .is_some_and(|v| v != current.max_quantity),
        SymbolField::MaxQuantity,
    );
    check(
        incoming
            .min_notional
            .is_some_and(|v| v != current.min_notional),
        SymbolField::MinNotional,
    );

    SymbolDiff { changed }
}

/// Merges `incoming` over `current`, returning the merged symbol and the diff.
///
/// `updated_at` is left untouched; the caller stamps it when the diff is
/// non-empty.
pub fn normalize(current: &Symbol, incoming: &SymbolFields) -> (Symbol, SymbolDiff) {
    let changes = diff(current, incoming);
    if !changes.is_changed() {
        return (current.clone(), changes);
    }

    let merged = Symbol {
        market_type: incoming.market_type,
        base_asset: incoming.base_asset.clone(),
        quote_asset: incoming.quote_asset.clone(),
        status: incoming.status,
        contract_type: Some(incoming.contract_type),
        delivery_date: incoming.delivery_date,
        margin_asset: incoming.margin_asset.clone(),
        price_precision: incoming.price_precision,
        quantity_precision: incoming.quantity_precision,
        min_quantity: incoming.min_quantity.unwrap_or(current.min_quantity),
        max_quantity: incoming.max_quantity.unwrap_or(current.max_quantity),
        min_notional: incoming.min_notional.unwrap_or(current.min_notional),
        ..current.clone()
    };
    (merged, changes)
}

/// Builds a catalog symbol for a name seen for the first time.
pub fn build_new(incoming: &SymbolFields, exchange_id: &str, now: DateTime<Utc>) -> Symbol {
    Symbol {
        id: Uuid::new_v4().to_string(),
        exchange_id: exchange_id.to_string(),
        symbol_name: incoming.symbol_name.clone(),
        market_type: incoming.market_type,
        base_asset: incoming.base_asset.clone(),
        quote_asset: incoming.quote_asset.clone(),
        status: incoming.status,
        price_precision: incoming.price_precision,
        quantity_precision: incoming.quantity_precision,
        contract_type: Some(incoming.contract_type),
        delivery_date: incoming.delivery_date,
        margin_asset: incoming.margin_asset.clone(),
        min_quantity: incoming.min_quantity.unwrap_or(Decimal::ZERO),
        min_notional: incoming.min_notional.unwrap_or(Decimal::ZERO),
        max_quantity: incoming.max_quantity.unwrap_or(Decimal::ZERO),
        updated_at: now,
    }
}

/// Number of fractional digits of a tick or step size, ignoring trailing zeros.
pub fn precision_from_step(step: Decimal) -> i32 {
    step.normalize().scale() as i32
}

/// Maps an exchange trading status to a catalog status.
pub fn map_external_status(status: &str) -> SymbolStatus {
    match status {
        "TRADING" => SymbolStatus::Active,
        "HALT" | "BREAK" | "END_OF_DAY" => SymbolStatus::Suspended,
        _ => SymbolStatus::Suspended,
    }
}

/// Maps an exchange contract type; no contract type means a spot instrument.
pub fn map_contract_type(contract_type: Option<&str>) -> ContractType {
    match contract_type.map(str::trim) {
        None | Some("") => ContractType::Spot,
        Some("PERPETUAL" | "PERPETUAL_DELIVERING" | "TRADIFI_PERPETUAL") => ContractType::Perpetual,
        Some("CURRENT_QUARTER" | "CURRENT_QUARTER_DELIVERING" | "CURRENT_MONTH") => {
            ContractType::CurrentQuarter
        }
        Some("NEXT_QUARTER" | "NEXT_QUARTER_DELIVERING" | "NEXT_MONTH") => {
            ContractType::NextQuarter
        }
        Some(_) => ContractType::Perpetual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fields() -> SymbolFields {
        SymbolFields {
            symbol_name: "BTCUSDT".to_string(),
            market_type: MarketType::Spot,
            base_asset: "BTC".to_string(),
            quote_asset: "USDT".to_string(),
            status: SymbolStatus::Active,
            contract_type: ContractType::Spot,
            delivery_date: None,
            margin_asset: None,
            price_precision: 2,
            quantity_precision: 5,
            min_quantity: Some(dec!(0.00001)),
            max_quantity: Some(dec!(9000)),
            min_notional: Some(dec!(5)),
        }
    }

    #[test]
    fn precision_ignores_trailing_zeros() {
        assert_eq!(precision_from_step(dec!(0.01000000)), 2);
        assert_eq!(precision_from_step(dec!(0.00001000)), 5);
        assert_eq!(precision_from_step(dec!(1.00000000)), 0);
        assert_eq!(precision_from_step(dec!(10)), 0);
    }

    #[test]
    fn status_mapping() {
        assert_eq!(map_external_status("TRADING"), SymbolStatus::Active);
        assert_eq!(map_external_status("HALT"), SymbolStatus::Suspended);
        assert_eq!(map_external_status("END_OF_DAY"), SymbolStatus::Suspended);
        assert_eq!(map_external_status("PENDING_TRADING"), SymbolStatus::Suspended);
    }

    #[test]
    fn contract_type_mapping() {
        assert_eq!(map_contract_type(None), ContractType::Spot);
        assert_eq!(map_contract_type(Some("")), ContractType::Spot);
        assert_eq!(map_contract_type(Some("PERPETUAL_DELIVERING")), ContractType::Perpetual);
        assert_eq!(map_contract_type(Some("CURRENT_MONTH")), ContractType::CurrentQuarter);
        assert_eq!(map_contract_type(Some("NEXT_QUARTER")), ContractType::NextQuarter);
        assert_eq!(map_contract_type(Some("SOMETHING_NEW")), ContractType::Perpetual);
    }

    #[test]
    fn identical_record_has_no_diff() {
        let now = Utc::now();
        let current = build_new(&fields(), "ex-1", now);
        let (merged, changes) = normalize(&current, &fields());
        assert!(!changes.is_changed());
        assert_eq!(merged, current);
    }

    #[test]
    fn absent_filters_leave_limits_alone() {
        let now = Utc::now();
        let current = build_new(&fields(), "ex-1", now);
        let mut incoming = fields();
        incoming.min_quantity = None;
        incoming.max_quantity = None;
        incoming.min_notional = None;

        let (merged, changes) = normalize(&current, &incoming);
        assert!(!changes.is_changed());
        assert_eq!(merged.min_notional, dec!(5));
    }

    #[test]
    fn absent_filters_become_zero_for_new_symbols() {
        let mut incoming = fields();
        incoming.min_notional = None;
        let symbol = build_new(&incoming, "ex-1", Utc::now());
        assert_eq!(symbol.min_notional, Decimal::ZERO);
        assert_eq!(symbol.min_quantity, dec!(0.00001));
    }

    #[test]
    fn diff_lists_changed_fields_and_keeps_identity() {
        let now = Utc::now();
        let current = build_new(&fields(), "ex-1", now);
        let mut incoming = fields();
        incoming.status = SymbolStatus::Suspended;
        incoming.max_quantity = Some(dec!(10000));

        let (merged, changes) = normalize(&current, &incoming);
        assert_eq!(
            changes.fields(),
            &[SymbolField::Status, SymbolField::MaxQuantity]
        );
        assert!(changes.status_changed());
        assert_eq!(merged.id, current.id);
        assert_eq!(merged.updated_at, current.updated_at);
        assert_eq!(merged.status, SymbolStatus::Suspended);
        assert_eq!(current.status, SymbolStatus::Active);
    }
}
