use chrono::Utc;
use log::{debug, error, info, warn};
use std::collections::HashMap;
use std::sync::Arc;

use super::change_applier::ChangeApplier;
use super::job::CancelSignal;
use super::reconciliation::reconcile;
use super::source::SymbolSource;
use super::sync_errors::SyncError;
use super::sync_model::{ReconcileContext, SyncOutcome, SyncStage, SyncSummary};
use crate::constants::SYNC_JOB_CONTEXT;
use crate::exchanges::ExchangeRepositoryTrait;
use crate::notifications::{NotificationDispatcherTrait, SymbolChangeBatch};
use crate::symbols::{Symbol, SymbolRepositoryTrait};

/// Drives one synchronization run per call: resolve the exchange, fetch the
/// feed, reconcile, persist, notify.
///
/// Cancellation is honoured before each stage up to and including persisting.
/// Once a transaction has committed the run always finishes so operators hear
/// about the changes.
pub struct SyncOrchestrator {
    exchange_repository: Arc<dyn ExchangeRepositoryTrait>,
    symbol_repository: Arc<dyn SymbolRepositoryTrait>,
    applier: ChangeApplier,
    dispatcher: Arc<dyn NotificationDispatcherTrait>,
}

enum Halt {
    Outcome(SyncOutcome),
    Error(SyncError),
}

impl From<SyncError> for Halt {
    fn from(e: SyncError) -> Self {
        Halt::Error(e)
    }
}

fn checkpoint(cancel: &CancelSignal, stage: SyncStage) -> Result<(), Halt> {
    if cancel.is_cancelled() {
        return Err(Halt::Outcome(SyncOutcome::Cancelled { stage }));
    }
    debug!("Sync stage: {}", stage);
    Ok(())
}

fn unexpected<E: ToString>(e: E) -> SyncError {
    SyncError::Unexpected {
        component: SYNC_JOB_CONTEXT.to_string(),
        message: e.to_string(),
    }
}

impl SyncOrchestrator {
    pub fn new(
        exchange_repository: Arc<dyn ExchangeRepositoryTrait>,
        symbol_repository: Arc<dyn SymbolRepositoryTrait>,
        applier: ChangeApplier,
        dispatcher: Arc<dyn NotificationDispatcherTrait>,
    ) -> Self {
        Self {
            exchange_repository,
            symbol_repository,
            applier,
            dispatcher,
        }
    }

    pub async fn run<S: SymbolSource>(&self, source: &S, cancel: &CancelSignal) -> SyncOutcome {
        let exchange_name = source.exchange_name();
        let market_type = source.market_type();
        info!(
            "Starting {} symbols synchronization at {}",
            exchange_name,
            Utc::now()
        );

        match self.execute(source, cancel).await {
            Ok(summary) => {
                info!(
                    "{} symbol synchronization finished: {} updated, {} added, {} removed, {} status changes",
                    exchange_name,
                    summary.updated,
                    summary.added,
                    summary.removed,
                    summary.status_changes
                );
                SyncOutcome::Completed(summary)
            }
            Err(Halt::Outcome(outcome)) => {
                match &outcome {
                    SyncOutcome::Cancelled { stage } => {
                        info!("{} synchronization cancelled before {}", exchange_name, stage)
                    }
                    SyncOutcome::ExchangeNotRegistered => {
                        warn!("{} exchange not found in the database.", exchange_name)
                    }
                    _ => {}
                }
                outcome
            }
            Err(Halt::Error(e)) => {
                error!(
                    "{} {} symbol synchronization failed: {}",
                    exchange_name, market_type, e
                );
                let alert = e.to_alert(exchange_name, market_type, Utc::now());
                self.dispatcher.dispatch_emergency(&alert).await;
                SyncOutcome::Failed(e)
            }
        }
    }

    async fn execute<S: SymbolSource>(
        &self,
        source: &S,
        cancel: &CancelSignal,
    ) -> Result<SyncSummary, Halt> {
        let exchange_name = source.exchange_name();
        let market_type = source.market_type();
        debug!("Sync stage: {}", SyncStage::Start);

        checkpoint(cancel, SyncStage::ResolveExchange)?;
        let exchange = self
            .exchange_repository
            .get_by_name(exchange_name)
            .map_err(unexpected)?
            .ok_or(Halt::Outcome(SyncOutcome::ExchangeNotRegistered))?;
        let existing: HashMap<String, Symbol> = self
            .symbol_repository
            .list_for_market(&exchange.id, market_type)
            .map_err(unexpected)?
            .into_iter()
            .map(|s| (s.symbol_name.clone(), s))
            .collect();

        checkpoint(cancel, SyncStage::FetchExternal)?;
        let api_error = |message: String| SyncError::ExchangeApi {
            exchange: exchange_name.to_string(),
            market_type,
            message,
        };
        let raw = source
            .fetch_raw()
            .await
            .map_err(|e| api_error(e.to_string()))?;
        let incoming = raw
            .iter()
            .map(|r| {
                source
                    .map_one(r)
                    .map_err(|e| api_error(format!("failed to map {}: {}", source.name_of(r), e)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            "Fetched {} {} symbols from {}",
            incoming.len(),
            market_type,
            exchange_name
        );

        checkpoint(cancel, SyncStage::Reconcile)?;
        let ctx = ReconcileContext {
            exchange_id: exchange.id.clone(),
            market_type,
            now: Utc::now(),
        };
        let result = reconcile(existing, incoming, &ctx);

        checkpoint(cancel, SyncStage::Persist)?;
        self.applier.apply(&result, SYNC_JOB_CONTEXT).await?;

        debug!("Sync stage: {}", SyncStage::Notify);
        if !result.is_empty() {
            let summary = SyncSummary::from(&result);
            let batch = SymbolChangeBatch {
                exchange_name: exchange.name.clone(),
                market_type,
                new_symbols: result.new_symbols,
                updated_symbols: result.updated_symbols,
                delisted_symbols: result.delisted_symbols,
                occurred_at: ctx.now,
            };
            self.dispatcher.dispatch_changes(&batch).await;
            debug!("Sync stage: {}", SyncStage::Done);
            return Ok(summary);
        }

        debug!("Sync stage: {}", SyncStage::Done);
        Ok(SyncSummary::default())
    }
}
