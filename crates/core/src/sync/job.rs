use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;

use super::orchestrator::SyncOrchestrator;
use super::source::SymbolSource;
use super::sync_model::SyncOutcome;
use crate::symbols::MarketType;

/// Cooperative cancellation flag observed between synchronization stages.
#[derive(Debug, Clone)]
pub struct CancelSignal(watch::Receiver<bool>);

impl CancelSignal {
    pub fn new(receiver: watch::Receiver<bool>) -> Self {
        Self(receiver)
    }

    /// A signal with its own channel. Send `true` on the returned sender to cancel.
    pub fn channel() -> (watch::Sender<bool>, Self) {
        let (tx, rx) = watch::channel(false);
        (tx, Self(rx))
    }

    /// A signal that never fires.
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self(rx)
    }

    pub fn is_cancelled(&self) -> bool {
        *self.0.borrow()
    }
}

/// A runnable synchronization for one exchange market, as seen by the scheduler.
#[async_trait]
pub trait SyncJobTrait: Send + Sync {
    fn exchange_name(&self) -> &str;

    fn market_type(&self) -> MarketType;

    async fn run(&self, cancel: &CancelSignal) -> SyncOutcome;
}

/// Couples a market's [`SymbolSource`] with the shared orchestrator.
pub struct SymbolSyncJob<S: SymbolSource> {
    source: S,
    orchestrator: Arc<SyncOrchestrator>,
}

impl<S: SymbolSource> SymbolSyncJob<S> {
    pub fn new(source: S, orchestrator: Arc<SyncOrchestrator>) -> Self {
        Self {
            source,
            orchestrator,
        }
    }
}

#[async_trait]
impl<S> SyncJobTrait for SymbolSyncJob<S>
where
    S: SymbolSource + 'static,
{
    fn exchange_name(&self) -> &str {
        self.source.exchange_name()
    }

    fn market_type(&self) -> MarketType {
        self.source.market_type()
    }

    async fn run(&self, cancel: &CancelSignal) -> SyncOutcome {
        self.orchestrator.run(&self.source, cancel).await
    }
}
