//! Synchronization run models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use super::sync_errors::SyncError;
use crate::statuses::Status;
use crate::symbols::{MarketType, Symbol};

/// Scope and clock of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileContext {
    pub exchange_id: String,
    pub market_type: MarketType,
    pub now: DateTime<Utc>,
}

/// The diff between the persisted catalog and an exchange snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconciliationResult {
    pub new_symbols: Vec<Symbol>,
    pub updated_symbols: Vec<Symbol>,
    pub delisted_symbols: Vec<Symbol>,
    pub status_changes: Vec<Status>,
}

impl ReconciliationResult {
    /// True when there is nothing to persist.
    pub fn is_empty(&self) -> bool {
        self.new_symbols.is_empty()
            && self.updated_symbols.is_empty()
            && self.delisted_symbols.is_empty()
            && self.status_changes.is_empty()
    }

    /// Number of symbols touched, status rows excluded.
    pub fn total_changes(&self) -> usize {
        self.new_symbols.len() + self.updated_symbols.len() + self.delisted_symbols.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Empty result; the store was not touched.
    Skipped,
    Committed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SyncStage {
    Start,
    ResolveExchange,
    FetchExternal,
    Reconcile,
    Persist,
    Notify,
    Done,
}

impl fmt::Display for SyncStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Counters reported at the end of a successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummary {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
    pub status_changes: usize,
}

impl From<&ReconciliationResult> for SyncSummary {
    fn from(result: &ReconciliationResult) -> Self {
        Self {
            added: result.new_symbols.len(),
            updated: result.updated_symbols.len(),
            removed: result.delisted_symbols.len(),
            status_changes: result.status_changes.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    Completed(SyncSummary),
    /// The exchange row is missing; the run was skipped.
    ExchangeNotRegistered,
    /// Cancellation was observed before `stage` started.
    Cancelled { stage: SyncStage },
    Failed(SyncError),
}

impl SyncOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, SyncOutcome::Completed(_))
    }
}
