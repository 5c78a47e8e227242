use chrono::{Duration, TimeZone, Utc};
use rust_decimal_macros::dec;
use std::collections::HashMap;

use super::normalizer::{build_new, SymbolFields};
use super::reconciliation::reconcile;
use super::sync_model::{ReconcileContext, ReconciliationResult};
use crate::symbols::{ContractType, MarketType, Symbol, SymbolStatus};

fn ctx() -> ReconcileContext {
    ReconcileContext {
        exchange_id: "exchange-1".to_string(),
        market_type: MarketType::Spot,
        now: Utc.with_ymd_and_hms(2025, 4, 20, 12, 0, 0).unwrap(),
    }
}

fn record(name: &str, status: SymbolStatus) -> SymbolFields {
    SymbolFields {
        symbol_name: name.to_string(),
        market_type: MarketType::Spot,
        base_asset: name.trim_end_matches("USDT").to_string(),
        quote_asset: "USDT".to_string(),
        status,
        contract_type: ContractType::Spot,
        delivery_date: None,
        margin_asset: None,
        price_precision: 2,
        quantity_precision: 2,
        min_quantity: Some(dec!(0.01)),
        max_quantity: Some(dec!(100000)),
        min_notional: Some(dec!(5)),
    }
}

/// A stored symbol as it would look after an earlier synchronization.
fn stored(name: &str, status: SymbolStatus) -> Symbol {
    let earlier = ctx().now - Duration::days(1);
    let mut symbol = build_new(&record(name, SymbolStatus::Active), "exchange-1", earlier);
    symbol.status = status;
    symbol
}

fn keyed(symbols: Vec<Symbol>) -> HashMap<String, Symbol> {
    symbols
        .into_iter()
        .map(|s| (s.symbol_name.clone(), s))
        .collect()
}

/// Applies a result to an in-memory catalog the way the change store would.
fn apply(state: &mut HashMap<String, Symbol>, result: &ReconciliationResult) {
    for symbol in result
        .new_symbols
        .iter()
        .chain(&result.updated_symbols)
        .chain(&result.delisted_symbols)
    {
        state.insert(symbol.symbol_name.clone(), symbol.clone());
    }
}

#[test]
fn unchanged_batch_is_idempotent() {
    let batch = vec![
        record("BTCUSDT", SymbolStatus::Active),
        record("ETHUSDT", SymbolStatus::Suspended),
    ];
    let mut state = keyed(vec![stored("DOGEUSDT", SymbolStatus::Active)]);

    let first = reconcile(state.clone(), batch.clone(), &ctx());
    assert_eq!(first.new_symbols.len(), 2);
    assert_eq!(first.delisted_symbols.len(), 1);
    apply(&mut state, &first);

    let second = reconcile(state, batch, &ctx());
    assert!(second.is_empty(), "second pass produced {second:?}");
}

#[test]
fn new_symbol_gets_one_status_row() {
    let result = reconcile(
        HashMap::new(),
        vec![record("BTCUSDT", SymbolStatus::Active)],
        &ctx(),
    );

    assert_eq!(result.new_symbols.len(), 1);
    let symbol = &result.new_symbols[0];
    assert_eq!(symbol.symbol_name, "BTCUSDT");
    assert_eq!(symbol.status, SymbolStatus::Active);
    assert_eq!(symbol.exchange_id, "exchange-1");
    assert_eq!(symbol.updated_at, ctx().now);

    assert_eq!(result.status_changes.len(), 1);
    assert_eq!(result.status_changes[0].symbol_id, symbol.id);
    assert_eq!(result.status_changes[0].symbol_status, SymbolStatus::Active);
    assert!(result.updated_symbols.is_empty());
    assert!(result.delisted_symbols.is_empty());
}

#[test]
fn missing_symbol_is_delisted() {
    let existing = stored("ETHUSDT", SymbolStatus::Active);
    let result = reconcile(keyed(vec![existing.clone()]), Vec::new(), &ctx());

    assert!(result.new_symbols.is_empty());
    assert!(result.updated_symbols.is_empty());
    assert_eq!(result.delisted_symbols.len(), 1);
    let delisted = &result.delisted_symbols[0];
    assert_eq!(delisted.symbol_name, "ETHUSDT");
    assert_eq!(delisted.status, SymbolStatus::Delisted);
    assert_eq!(delisted.updated_at, ctx().now);

    assert_eq!(result.status_changes.len(), 1);
    assert_eq!(result.status_changes[0].symbol_id, existing.id);
    assert_eq!(result.status_changes[0].symbol_status, SymbolStatus::Delisted);
}

#[test]
fn already_delisted_symbol_is_not_delisted_again() {
    let result = reconcile(
        keyed(vec![stored("ETHUSDT", SymbolStatus::Delisted)]),
        Vec::new(),
        &ctx(),
    );
    assert!(result.is_empty());
}

#[test]
fn admin_suppression_is_sticky() {
    let result = reconcile(
        keyed(vec![stored("XRPUSDT", SymbolStatus::RemovedByAdmin)]),
        vec![record("XRPUSDT", SymbolStatus::Active)],
        &ctx(),
    );
    assert!(result.is_empty(), "suppressed symbol was touched: {result:?}");

    // Omitted from the feed, it is not delisted either.
    let result = reconcile(
        keyed(vec![stored("XRPUSDT", SymbolStatus::RemovedByAdmin)]),
        Vec::new(),
        &ctx(),
    );
    assert!(result.is_empty());
}

#[test]
fn field_change_without_status_change_adds_no_status_row() {
    let existing = stored("ADAUSDT", SymbolStatus::Active);
    let mut incoming = record("ADAUSDT", SymbolStatus::Active);
    incoming.base_asset = "ADA2".to_string();

    let result = reconcile(keyed(vec![existing.clone()]), vec![incoming], &ctx());

    assert_eq!(result.updated_symbols.len(), 1);
    let updated = &result.updated_symbols[0];
    assert_eq!(updated.id, existing.id);
    assert_eq!(updated.base_asset, "ADA2");
    assert_eq!(updated.quantity_precision, 2);
    assert_eq!(updated.updated_at, ctx().now);
    assert!(result.status_changes.is_empty());
}

#[test]
fn status_change_adds_status_row() {
    let existing = stored("BNBUSDT", SymbolStatus::Active);
    let result = reconcile(
        keyed(vec![existing.clone()]),
        vec![record("BNBUSDT", SymbolStatus::Suspended)],
        &ctx(),
    );

    assert_eq!(result.updated_symbols.len(), 1);
    assert_eq!(result.status_changes.len(), 1);
    assert_eq!(result.status_changes[0].symbol_id, existing.id);
    assert_eq!(result.status_changes[0].symbol_status, SymbolStatus::Suspended);
}

#[test]
fn admin_added_symbol_is_confirmed_by_feed() {
    let existing = stored("SOLUSDT", SymbolStatus::AddedByAdmin);
    let result = reconcile(
        keyed(vec![existing]),
        vec![record("SOLUSDT", SymbolStatus::Active)],
        &ctx(),
    );

    assert!(result.new_symbols.is_empty());
    assert_eq!(result.updated_symbols.len(), 1);
    assert_eq!(result.updated_symbols[0].status, SymbolStatus::Active);
    assert_eq!(result.status_changes.len(), 1);
}

#[test]
fn duplicate_names_collapse_to_last_record() {
    let first = record("BTCUSDT", SymbolStatus::Active);
    let mut last = record("BTCUSDT", SymbolStatus::Suspended);
    last.price_precision = 4;

    let result = reconcile(
        HashMap::new(),
        vec![first, record("ETHUSDT", SymbolStatus::Active), last],
        &ctx(),
    );

    let names: Vec<&str> = result
        .new_symbols
        .iter()
        .map(|s| s.symbol_name.as_str())
        .collect();
    assert_eq!(names, vec!["BTCUSDT", "ETHUSDT"]);
    assert_eq!(result.new_symbols[0].status, SymbolStatus::Suspended);
    assert_eq!(result.new_symbols[0].price_precision, 4);
    assert_eq!(result.status_changes.len(), 2);
}

#[test]
fn other_market_types_are_out_of_scope() {
    let mut futures = stored("BTCUSDT", SymbolStatus::Active);
    futures.market_type = MarketType::UsdtFutures;

    // A futures row is neither matched nor delisted by a spot pass.
    let result = reconcile(keyed(vec![futures]), Vec::new(), &ctx());
    assert!(result.is_empty());
}

#[test]
fn result_does_not_depend_on_batch_order() {
    let existing = keyed(vec![
        stored("ETHUSDT", SymbolStatus::Active),
        stored("LTCUSDT", SymbolStatus::Active),
        stored("XRPUSDT", SymbolStatus::RemovedByAdmin),
    ]);
    let batch = vec![
        record("BTCUSDT", SymbolStatus::Active),
        record("ETHUSDT", SymbolStatus::Suspended),
        record("XRPUSDT", SymbolStatus::Active),
    ];
    let mut reversed = batch.clone();
    reversed.reverse();

    let a = reconcile(existing.clone(), batch, &ctx());
    let b = reconcile(existing, reversed, &ctx());

    let names = |symbols: &[Symbol]| {
        let mut names: Vec<String> = symbols.iter().map(|s| s.symbol_name.clone()).collect();
        names.sort();
        names
    };
    assert_eq!(names(&a.new_symbols), names(&b.new_symbols));
    assert_eq!(names(&a.updated_symbols), names(&b.updated_symbols));
    assert_eq!(names(&a.delisted_symbols), names(&b.delisted_symbols));
    assert_eq!(a.status_changes.len(), b.status_changes.len());
    assert_eq!(a.total_changes(), 3);
}
