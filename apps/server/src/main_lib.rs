use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use symbolsync_core::{
    exchanges::{ExchangeRepositoryTrait, ExchangeService, ExchangeServiceTrait},
    notifications::{
        EmergencyNotifier, NotificationDispatcher, NotificationDispatcherTrait,
        NotificationSettingsService, NotificationSettingsServiceTrait, SymbolChangeNotifier,
    },
    statuses::{StatusService, StatusServiceTrait},
    symbols::{MarketType, SymbolRepositoryTrait, SymbolService, SymbolServiceTrait},
    sync::{CancelSignal, ChangeApplier, SymbolSyncJob, SyncOrchestrator},
};
use symbolsync_market_data::{
    BinanceClient, BinanceCoinFuturesSource, BinanceSpotSource, BinanceUsdtFuturesSource,
};
use symbolsync_notifications::{
    EmailEmergencyNotifier, EmailNotifier, FormatOptions, NotificationChannelConfig, SmtpMailer,
    TelegramNotifier,
};
use symbolsync_storage_sqlite::{
    create_pool, init, run_migrations, spawn_writer, ExchangeRepository,
    NotificationSettingsRepository, SqliteSymbolChangeStore, StatusRepository, SymbolRepository,
};

use crate::config::Config;
use crate::scheduler::ScheduledJob;

pub struct AppState {
    pub exchange_service: Arc<dyn ExchangeServiceTrait>,
    pub symbol_service: Arc<dyn SymbolServiceTrait>,
    pub status_service: Arc<dyn StatusServiceTrait>,
    pub notification_settings_service: Arc<dyn NotificationSettingsServiceTrait>,
    pub sync_jobs: Vec<Arc<ScheduledJob>>,
    shutdown: watch::Sender<bool>,
}

impl AppState {
    pub fn sync_job(&self, market_type: MarketType) -> Option<Arc<ScheduledJob>> {
        self.sync_jobs
            .iter()
            .find(|job| job.market_type() == market_type)
            .cloned()
    }

    pub fn cancel_signal(&self) -> CancelSignal {
        CancelSignal::new(self.shutdown.subscribe())
    }

    /// Asks running and future sync runs to stop at their next checkpoint.
    pub fn request_shutdown(&self) {
        self.shutdown.send_replace(true);
    }
}

pub fn init_tracing() {
    let log_format = std::env::var("SS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

fn build_notifiers(
    config: &NotificationChannelConfig,
) -> (
    Vec<Arc<dyn SymbolChangeNotifier>>,
    Vec<Arc<dyn EmergencyNotifier>>,
) {
    let format = FormatOptions {
        include_details: config.telegram.include_details,
        max_symbols_per_message: config.telegram.max_symbols_per_message,
    };
    let mailer = SmtpMailer::new(config.smtp.clone());

    // Unconfigured channels stay registered; the dispatcher skips them.
    let change: Vec<Arc<dyn SymbolChangeNotifier>> = vec![
        Arc::new(TelegramNotifier::new(config.telegram.clone())),
        Arc::new(EmailNotifier::new(
            mailer.clone(),
            config.email_recipients.clone(),
            format,
        )),
    ];
    let emergency: Vec<Arc<dyn EmergencyNotifier>> = vec![Arc::new(EmailEmergencyNotifier::new(
        mailer,
        config.emergency_recipients.clone(),
    ))];
    (change, emergency)
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);
    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer(&pool)?;

    let exchange_repository: Arc<dyn ExchangeRepositoryTrait> =
        Arc::new(ExchangeRepository::new(pool.clone(), writer.clone()));
    let symbol_repository: Arc<dyn SymbolRepositoryTrait> =
        Arc::new(SymbolRepository::new(pool.clone(), writer.clone()));
    let status_repository = Arc::new(StatusRepository::new(pool.clone()));
    let settings_repository = Arc::new(NotificationSettingsRepository::new(
        pool.clone(),
        writer.clone(),
    ));

    let exchange_service = Arc::new(ExchangeService::new(exchange_repository.clone()));
    exchange_service.ensure_supported_exchanges().await?;

    let symbol_service: Arc<dyn SymbolServiceTrait> = Arc::new(SymbolService::new(
        exchange_repository.clone(),
        symbol_repository.clone(),
    ));
    let status_service = Arc::new(StatusService::new(
        symbol_service.clone(),
        status_repository,
    ));

    let channels = Arc::new(config.notifications.clone());
    let notification_settings_service = Arc::new(NotificationSettingsService::new(
        settings_repository.clone(),
        channels.clone(),
    ));
    let (change_notifiers, emergency_notifiers) = build_notifiers(&config.notifications);
    let dispatcher = Arc::new(NotificationDispatcher::new(
        settings_repository,
        channels,
        change_notifiers,
        emergency_notifiers,
    ));

    let alerts: Arc<dyn NotificationDispatcherTrait> = dispatcher.clone();
    let applier = ChangeApplier::new(Arc::new(SqliteSymbolChangeStore::new(writer)));
    let orchestrator = Arc::new(SyncOrchestrator::new(
        exchange_repository,
        symbol_repository,
        applier,
        dispatcher,
    ));
    let sync_jobs = vec![
        Arc::new(ScheduledJob::new(
            SymbolSyncJob::new(
                BinanceSpotSource::new(BinanceClient::new(&config.binance.spot)),
                orchestrator.clone(),
            ),
            alerts.clone(),
        )),
        Arc::new(ScheduledJob::new(
            SymbolSyncJob::new(
                BinanceUsdtFuturesSource::new(BinanceClient::new(&config.binance.usdt_futures)),
                orchestrator.clone(),
            ),
            alerts.clone(),
        )),
        Arc::new(ScheduledJob::new(
            SymbolSyncJob::new(
                BinanceCoinFuturesSource::new(BinanceClient::new(&config.binance.coin_futures)),
                orchestrator,
            ),
            alerts,
        )),
    ];

    let (shutdown, _) = watch::channel(false);

    Ok(Arc::new(AppState {
        exchange_service,
        symbol_service,
        status_service,
        notification_settings_service,
        sync_jobs,
        shutdown,
    }))
}
