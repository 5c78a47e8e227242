use async_trait::async_trait;
use log::{debug, error};
use std::sync::Arc;

use super::sync_errors::SyncError;
use super::sync_model::{ApplyOutcome, ReconciliationResult};
use crate::errors::Result;

/// Unit of work persisting a reconciliation result.
///
/// Implementations must write everything in one transaction: updated
/// symbols, new symbols, delisted symbols and status rows, or nothing.
#[async_trait]
pub trait SymbolChangeStore: Send + Sync {
    async fn persist(&self, result: &ReconciliationResult) -> Result<()>;
}

/// Commits reconciliation results through a [`SymbolChangeStore`].
pub struct ChangeApplier {
    store: Arc<dyn SymbolChangeStore>,
}

impl ChangeApplier {
    pub fn new(store: Arc<dyn SymbolChangeStore>) -> Self {
        Self { store }
    }

    /// Persists `result`. Empty results never reach the store; failures are
    /// reported as database errors labelled with `context` and not retried.
    pub async fn apply(
        &self,
        result: &ReconciliationResult,
        context: &str,
    ) -> std::result::Result<ApplyOutcome, SyncError> {
        if result.is_empty() {
            debug!("{}: nothing to persist", context);
            return Ok(ApplyOutcome::Skipped);
        }

        match self.store.persist(result).await {
            Ok(()) => Ok(ApplyOutcome::Committed),
            Err(e) => {
                error!("{}: failed to persist symbol changes: {}", context, e);
                Err(SyncError::Database {
                    context: context.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }
}
