//! Background scheduler for periodic symbol synchronization.
//!
//! Every market type gets its own task so a slow exchange never delays the
//! others. A job never overlaps itself: scheduled and manually triggered runs
//! share one lock per job. Each run executes in its own task, so a panic
//! becomes a failed run plus a system alert instead of killing the loop.

use chrono::Utc;
use std::any::Any;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinError;
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use symbolsync_core::notifications::NotificationDispatcherTrait;
use symbolsync_core::symbols::MarketType;
use symbolsync_core::sync::{CancelSignal, SyncError, SyncJobTrait, SyncOutcome};

use crate::config::SyncConfig;
use crate::main_lib::AppState;

/// A sync job plus the lock that keeps its runs from overlapping.
pub struct ScheduledJob {
    job: Arc<dyn SyncJobTrait>,
    running: Mutex<()>,
    alerts: Arc<dyn NotificationDispatcherTrait>,
}

impl ScheduledJob {
    pub fn new(
        job: impl SyncJobTrait + 'static,
        alerts: Arc<dyn NotificationDispatcherTrait>,
    ) -> Self {
        Self {
            job: Arc::new(job),
            running: Mutex::new(()),
            alerts,
        }
    }

    pub fn exchange_name(&self) -> &str {
        self.job.exchange_name()
    }

    pub fn market_type(&self) -> MarketType {
        self.job.market_type()
    }

    /// Waits for any run in progress, then runs.
    pub async fn run(&self, cancel: &CancelSignal) -> SyncOutcome {
        let _guard = self.running.lock().await;
        self.run_isolated(cancel).await
    }

    /// Runs now, or returns None when a run is already in progress.
    pub async fn try_run(&self, cancel: &CancelSignal) -> Option<SyncOutcome> {
        let _guard = self.running.try_lock().ok()?;
        Some(self.run_isolated(cancel).await)
    }

    async fn run_isolated(&self, cancel: &CancelSignal) -> SyncOutcome {
        let job = self.job.clone();
        let cancel = cancel.clone();
        match tokio::spawn(async move { job.run(&cancel).await }).await {
            Ok(outcome) => outcome,
            Err(join_error) => {
                let failure = SyncError::Unexpected {
                    component: "SyncScheduler".to_string(),
                    message: describe_join_error(join_error),
                };
                error!("{} {} sync aborted: {}", self.exchange_name(), self.market_type(), failure);
                let alert = failure.to_alert(self.exchange_name(), self.market_type(), Utc::now());
                self.alerts.dispatch_emergency(&alert).await;
                SyncOutcome::Failed(failure)
            }
        }
    }
}

fn describe_join_error(join_error: JoinError) -> String {
    if !join_error.is_panic() {
        return "sync task was cancelled".to_string();
    }
    let payload: Box<dyn Any + Send> = join_error.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("sync task panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("sync task panicked: {}", message)
    } else {
        "sync task panicked".to_string()
    }
}

/// Starts one periodic task per configured job.
pub fn start_sync_scheduler(state: Arc<AppState>, config: SyncConfig) {
    if !config.enabled {
        info!("Symbol sync scheduler disabled");
        return;
    }

    for job in state.sync_jobs.iter().cloned() {
        let cancel = state.cancel_signal();
        tokio::spawn(async move {
            info!(
                "{} sync scheduler started ({}s interval)",
                job.exchange_name(),
                config.interval.as_secs()
            );

            sleep(config.initial_delay).await;

            // First tick is immediate, later ticks are one interval apart.
            let mut ticker = interval(config.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                if cancel.is_cancelled() {
                    debug!("{} sync scheduler stopping", job.exchange_name());
                    break;
                }
                run_scheduled_sync(&job, &cancel).await;
            }
        });
    }
}

async fn run_scheduled_sync(job: &ScheduledJob, cancel: &CancelSignal) {
    debug!("Running scheduled {} sync", job.exchange_name());
    match job.run(cancel).await {
        SyncOutcome::Completed(summary) => debug!(
            "Scheduled {} sync completed: {} changes",
            job.exchange_name(),
            summary.added + summary.updated + summary.removed
        ),
        SyncOutcome::ExchangeNotRegistered => {
            warn!("Scheduled {} sync skipped: exchange not registered", job.exchange_name())
        }
        SyncOutcome::Cancelled { stage } => {
            info!("Scheduled {} sync cancelled before {}", job.exchange_name(), stage)
        }
        // The orchestrator already logged and alerted.
        SyncOutcome::Failed(_) => {}
    }
}
