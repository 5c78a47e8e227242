use async_trait::async_trait;
use rust_decimal_macros::dec;
use std::sync::{Arc, Mutex};

use super::change_applier::ChangeApplier;
use super::job::{CancelSignal, SymbolSyncJob, SyncJobTrait};
use super::normalizer::SymbolFields;
use super::orchestrator::SyncOrchestrator;
use super::source::SymbolSource;
use super::sync_errors::SyncError;
use super::sync_model::{SyncOutcome, SyncStage, SyncSummary};
use crate::errors::{Error, Result};
use crate::notifications::{
    EmergencyAlert, EmergencyKind, NotificationDispatcherTrait, SymbolChangeBatch,
};
use crate::symbols::{ContractType, MarketType, SymbolStatus};
use crate::test_support::InMemoryCatalog;

const EXCHANGE: &str = "BinanceSpot";

struct FakeSource {
    exchange: String,
    feed: Mutex<std::result::Result<Vec<SymbolFields>, String>>,
}

impl FakeSource {
    fn new(feed: Vec<SymbolFields>) -> Self {
        Self {
            exchange: EXCHANGE.to_string(),
            feed: Mutex::new(Ok(feed)),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            exchange: EXCHANGE.to_string(),
            feed: Mutex::new(Err(message.to_string())),
        }
    }
}

#[async_trait]
impl SymbolSource for FakeSource {
    type Raw = SymbolFields;

    fn exchange_name(&self) -> &str {
        &self.exchange
    }

    fn market_type(&self) -> MarketType {
        MarketType::Spot
    }

    async fn fetch_raw(&self) -> Result<Vec<SymbolFields>> {
        self.feed
            .lock()
            .unwrap()
            .clone()
            .map_err(Error::MarketData)
    }

    fn map_one(&self, raw: &SymbolFields) -> Result<SymbolFields> {
        Ok(raw.clone())
    }

    fn name_of(&self, raw: &SymbolFields) -> String {
        raw.symbol_name.clone()
    }
}

#[derive(Default)]
struct RecordingDispatcher {
    batches: Mutex<Vec<SymbolChangeBatch>>,
    alerts: Mutex<Vec<EmergencyAlert>>,
}

#[async_trait]
impl NotificationDispatcherTrait for RecordingDispatcher {
    async fn dispatch_changes(&self, batch: &SymbolChangeBatch) {
        self.batches.lock().unwrap().push(batch.clone());
    }

    async fn dispatch_emergency(&self, alert: &EmergencyAlert) {
        self.alerts.lock().unwrap().push(alert.clone());
    }
}

fn record(name: &str) -> SymbolFields {
    SymbolFields {
        symbol_name: name.to_string(),
        market_type: MarketType::Spot,
        base_asset: name.trim_end_matches("USDT").to_string(),
        quote_asset: "USDT".to_string(),
        status: SymbolStatus::Active,
        contract_type: ContractType::Spot,
        delivery_date: None,
        margin_asset: None,
        price_precision: 2,
        quantity_precision: 4,
        min_quantity: Some(dec!(0.0001)),
        max_quantity: Some(dec!(9000)),
        min_notional: Some(dec!(5)),
    }
}

fn setup(catalog: InMemoryCatalog) -> (SyncOrchestrator, Arc<InMemoryCatalog>, Arc<RecordingDispatcher>) {
    let catalog = Arc::new(catalog);
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let orchestrator = SyncOrchestrator::new(
        catalog.clone(),
        catalog.clone(),
        ChangeApplier::new(catalog.clone()),
        dispatcher.clone(),
    );
    (orchestrator, catalog, dispatcher)
}

#[tokio::test]
async fn first_run_creates_and_notifies_once() {
    let (orchestrator, catalog, dispatcher) = setup(InMemoryCatalog::with_exchange(EXCHANGE));
    let source = FakeSource::new(vec![record("BTCUSDT"), record("ETHUSDT")]);

    let outcome = orchestrator.run(&source, &CancelSignal::never()).await;

    assert_eq!(
        outcome,
        SyncOutcome::Completed(SyncSummary {
            added: 2,
            updated: 0,
            removed: 0,
            status_changes: 2,
        })
    );
    assert_eq!(catalog.symbols.lock().unwrap().len(), 2);
    let btc = catalog.symbol("BTCUSDT", MarketType::Spot).unwrap();
    assert_eq!(btc.exchange_id, catalog.exchange_id(EXCHANGE));
    let batches = dispatcher.batches.lock().unwrap();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].exchange_name, EXCHANGE);
    assert_eq!(batches[0].new_symbols.len(), 2);
    assert!(dispatcher.alerts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unchanged_run_does_not_notify() {
    let (orchestrator, catalog, dispatcher) = setup(InMemoryCatalog::with_exchange(EXCHANGE));
    let source = FakeSource::new(vec![record("BTCUSDT")]);

    orchestrator.run(&source, &CancelSignal::never()).await;
    let outcome = orchestrator.run(&source, &CancelSignal::never()).await;

    assert_eq!(outcome, SyncOutcome::Completed(SyncSummary::default()));
    assert_eq!(dispatcher.batches.lock().unwrap().len(), 1);
    // The empty second pass never reached the store.
    assert_eq!(*catalog.persist_calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn missing_exchange_skips_run() {
    let (orchestrator, catalog, dispatcher) = setup(InMemoryCatalog::default());
    let source = FakeSource::new(vec![record("BTCUSDT")]);

    let outcome = orchestrator.run(&source, &CancelSignal::never()).await;

    assert_eq!(outcome, SyncOutcome::ExchangeNotRegistered);
    assert!(catalog.symbols.lock().unwrap().is_empty());
    assert!(dispatcher.alerts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn fetch_failure_raises_exchange_api_alert() {
    let (orchestrator, catalog, dispatcher) = setup(InMemoryCatalog::with_exchange(EXCHANGE));
    let source = FakeSource::failing("HTTP 418");

    let outcome = orchestrator.run(&source, &CancelSignal::never()).await;

    match outcome {
        SyncOutcome::Failed(SyncError::ExchangeApi {
            exchange,
            market_type,
            message,
        }) => {
            assert_eq!(exchange, EXCHANGE);
            assert_eq!(market_type, MarketType::Spot);
            assert!(message.contains("HTTP 418"));
        }
        other => panic!("expected exchange API failure, got {other:?}"),
    }
    assert_eq!(*catalog.persist_calls.lock().unwrap(), 0);
    let alerts = dispatcher.alerts.lock().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, EmergencyKind::ExchangeApiError);
}

#[tokio::test]
async fn persist_failure_raises_database_alert() {
    let catalog = InMemoryCatalog::with_exchange(EXCHANGE);
    *catalog.fail_persist.lock().unwrap() = true;
    let (orchestrator, catalog, dispatcher) = setup(catalog);
    let source = FakeSource::new(vec![record("BTCUSDT")]);

    let outcome = orchestrator.run(&source, &CancelSignal::never()).await;

    assert!(matches!(
        outcome,
        SyncOutcome::Failed(SyncError::Database { .. })
    ));
    assert!(catalog.symbols.lock().unwrap().is_empty());
    assert!(dispatcher.batches.lock().unwrap().is_empty());
    let alerts = dispatcher.alerts.lock().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, EmergencyKind::DatabaseError);
    assert_eq!(
        alerts[0].context,
        vec![("Operation".to_string(), "SymbolSyncJob".to_string())]
    );
}

#[tokio::test]
async fn read_failure_raises_system_alert() {
    let catalog = InMemoryCatalog::with_exchange(EXCHANGE);
    *catalog.fail_reads.lock().unwrap() = true;
    let (orchestrator, _, dispatcher) = setup(catalog);
    let source = FakeSource::new(vec![record("BTCUSDT")]);

    let outcome = orchestrator.run(&source, &CancelSignal::never()).await;

    assert!(matches!(
        outcome,
        SyncOutcome::Failed(SyncError::Unexpected { .. })
    ));
    let alerts = dispatcher.alerts.lock().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, EmergencyKind::SystemError);
}

#[tokio::test]
async fn cancelled_run_stops_before_first_stage() {
    let (orchestrator, catalog, dispatcher) = setup(InMemoryCatalog::with_exchange(EXCHANGE));
    let source = FakeSource::new(vec![record("BTCUSDT")]);
    let (tx, cancel) = CancelSignal::channel();
    tx.send(true).unwrap();

    let outcome = orchestrator.run(&source, &cancel).await;

    assert_eq!(
        outcome,
        SyncOutcome::Cancelled {
            stage: SyncStage::ResolveExchange
        }
    );
    assert!(catalog.symbols.lock().unwrap().is_empty());
    assert!(dispatcher.batches.lock().unwrap().is_empty());
    assert!(dispatcher.alerts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn job_delegates_to_orchestrator() {
    let (orchestrator, catalog, _) = setup(InMemoryCatalog::with_exchange(EXCHANGE));
    let job: Box<dyn SyncJobTrait> = Box::new(SymbolSyncJob::new(
        FakeSource::new(vec![record("BTCUSDT")]),
        Arc::new(orchestrator),
    ));

    assert_eq!(job.exchange_name(), EXCHANGE);
    assert_eq!(job.market_type(), MarketType::Spot);
    assert!(job.run(&CancelSignal::never()).await.is_completed());
    assert!(catalog.symbol("BTCUSDT", MarketType::Spot).is_some());
}
