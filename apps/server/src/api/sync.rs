use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use symbolsync_core::errors::Error as CoreError;
use symbolsync_core::symbols::MarketType;
use symbolsync_core::sync::{SyncOutcome, SyncStage, SyncSummary};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SyncRunReport {
    exchange_name: String,
    market_type: MarketType,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<SyncSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cancelled_before: Option<SyncStage>,
}

/// Runs one synchronization of `marketType` right away and reports how it ended.
async fn trigger_sync(
    Path(market_type): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SyncRunReport>> {
    let market_type = MarketType::from_str(&market_type)?;
    let job = state.sync_job(market_type).ok_or(ApiError::NotFound)?;
    let exchange_name = job.exchange_name().to_string();

    let outcome = job.try_run(&state.cancel_signal()).await.ok_or_else(|| {
        ApiError::Conflict(format!(
            "{} synchronization is already running",
            exchange_name
        ))
    })?;

    let mut report = SyncRunReport {
        exchange_name,
        market_type,
        outcome: "Completed",
        summary: None,
        cancelled_before: None,
    };
    match outcome {
        SyncOutcome::Completed(summary) => report.summary = Some(summary),
        SyncOutcome::Cancelled { stage } => {
            report.outcome = "Cancelled";
            report.cancelled_before = Some(stage);
        }
        SyncOutcome::ExchangeNotRegistered => {
            return Err(CoreError::not_found("Exchange", report.exchange_name).into())
        }
        SyncOutcome::Failed(e) => return Err(ApiError::Internal(e.to_string())),
    }
    Ok(Json(report))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/sync/{market_type}", post(trigger_sync))
}
