//! Status history endpoints, mirroring the symbol listings.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use symbolsync_core::statuses::SymbolHistory;

use super::shared::{MarketTypeQuery, PageQuery};
use crate::{error::ApiResult, main_lib::AppState};

async fn paged_history(
    Path(exchange): Path<String>,
    Query(q): Query<PageQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<SymbolHistory>>> {
    let page = q.pagination()?;
    let histories = state
        .status_service
        .exchange_history(&exchange, Some(page), false)?;
    Ok(Json(histories))
}

async fn full_history(
    Path(exchange): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<SymbolHistory>>> {
    let histories = state
        .status_service
        .exchange_history(&exchange, None, false)?;
    Ok(Json(histories))
}

async fn paged_active_history(
    Path(exchange): Path<String>,
    Query(q): Query<PageQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<SymbolHistory>>> {
    let page = q.pagination()?;
    let histories = state
        .status_service
        .exchange_history(&exchange, Some(page), true)?;
    Ok(Json(histories))
}

async fn full_active_history(
    Path(exchange): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<SymbolHistory>>> {
    let histories = state.status_service.exchange_history(&exchange, None, true)?;
    Ok(Json(histories))
}

async fn symbol_history(
    Path((exchange, symbol)): Path<(String, String)>,
    Query(q): Query<MarketTypeQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SymbolHistory>> {
    let history = state
        .status_service
        .symbol_history(&exchange, &symbol, q.market_type()?)?;
    Ok(Json(history))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/exchanges/{exchange}/symbols/history", get(paged_history))
        .route("/exchanges/{exchange}/symbols-list/history", get(full_history))
        .route(
            "/exchanges/{exchange}/active-symbols/history",
            get(paged_active_history),
        )
        .route(
            "/exchanges/{exchange}/active-symbols-list/history",
            get(full_active_history),
        )
        .route(
            "/exchanges/{exchange}/symbols/{symbol}/history",
            get(symbol_history),
        )
}
