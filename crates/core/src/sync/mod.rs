//! Symbol synchronization: normalization, reconciliation, persistence and the
//! per-market job driver.

mod change_applier;
mod job;
pub mod normalizer;
mod orchestrator;
mod reconciliation;
mod source;
mod sync_errors;
mod sync_model;

#[cfg(test)]
mod orchestrator_tests;
#[cfg(test)]
mod reconciliation_tests;

pub use change_applier::{ChangeApplier, SymbolChangeStore};
pub use job::{CancelSignal, SymbolSyncJob, SyncJobTrait};
pub use normalizer::{SymbolDiff, SymbolField, SymbolFields};
pub use orchestrator::SyncOrchestrator;
pub use reconciliation::reconcile;
pub use source::SymbolSource;
pub use sync_errors::SyncError;
pub use sync_model::{
    ApplyOutcome, ReconcileContext, ReconciliationResult, SyncOutcome, SyncStage, SyncSummary,
};
