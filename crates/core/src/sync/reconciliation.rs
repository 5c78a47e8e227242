//! Diff-and-merge of an exchange snapshot against the persisted catalog.

use std::collections::{HashMap, HashSet};

use super::normalizer::{build_new, normalize, SymbolFields};
use super::sync_model::{ReconcileContext, ReconciliationResult};
use crate::statuses::Status;
use crate::symbols::{Symbol, SymbolStatus};

/// Collapses repeated names, keeping the last record at the first position.
fn dedupe_by_name(incoming: Vec<SymbolFields>) -> Vec<SymbolFields> {
    let mut position: HashMap<String, usize> = HashMap::with_capacity(incoming.len());
    let mut unique: Vec<SymbolFields> = Vec::with_capacity(incoming.len());
    for record in incoming {
        match position.get(&record.symbol_name) {
            Some(&idx) => unique[idx] = record,
            None => {
                position.insert(record.symbol_name.clone(), unique.len());
                unique.push(record);
            }
        }
    }
    unique
}

/// Classifies every incoming record as new, updated or unchanged, and every
/// unseen stored symbol as delisted.
///
/// `existing` is keyed by symbol name; symbols of other market types are
/// ignored. Symbols suppressed by an administrator are never touched.
pub fn reconcile(
    existing: HashMap<String, Symbol>,
    incoming: Vec<SymbolFields>,
    ctx: &ReconcileContext,
) -> ReconciliationResult {
    let mut existing: HashMap<String, Symbol> = existing
        .into_iter()
        .filter(|(_, s)| s.market_type == ctx.market_type)
        .collect();

    let mut result = ReconciliationResult::default();
    let mut seen: HashSet<String> = HashSet::new();

    for record in dedupe_by_name(incoming) {
        seen.insert(record.symbol_name.clone());

        match existing.get(&record.symbol_name) {
            Some(current) if current.status == SymbolStatus::RemovedByAdmin => {}
            Some(current) => {
                let (mut merged, changes) = normalize(current, &record);
                if changes.status_changed() {
                    result
                        .status_changes
                        .push(Status::record(merged.id.clone(), merged.status, ctx.now));
                }
                if changes.is_changed() {
                    merged.updated_at = ctx.now;
                    result.updated_symbols.push(merged);
                }
            }
            None => {
                let symbol = build_new(&record, &ctx.exchange_id, ctx.now);
                result
                    .status_changes
                    .push(Status::record(symbol.id.clone(), symbol.status, ctx.now));
                result.new_symbols.push(symbol);
            }
        }
    }

    let mut unseen: Vec<String> = existing
        .keys()
        .filter(|name| !seen.contains(*name))
        .cloned()
        .collect();
    unseen.sort();
    for name in unseen {
        let Some(mut symbol) = existing.remove(&name) else {
            continue;
        };
        if matches!(
            symbol.status,
            SymbolStatus::Delisted | SymbolStatus::RemovedByAdmin
        ) {
            continue;
        }
        symbol.status = SymbolStatus::Delisted;
        symbol.updated_at = ctx.now;
        result
            .status_changes
            .push(Status::record(symbol.id.clone(), SymbolStatus::Delisted, ctx.now));
        result.delisted_symbols.push(symbol);
    }

    result
}
