use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use symbolsync_core::symbols::{AddSymbol, Symbol};

use super::shared::{MarketTypeQuery, PageQuery};
use crate::{error::ApiResult, main_lib::AppState};

async fn list_symbols(
    Path(exchange): Path<String>,
    Query(q): Query<PageQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Symbol>>> {
    let page = q.pagination()?;
    let symbols = state
        .symbol_service
        .list_symbols(&exchange, Some(page), false)?;
    Ok(Json(symbols))
}

async fn list_all_symbols(
    Path(exchange): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Symbol>>> {
    let symbols = state.symbol_service.list_symbols(&exchange, None, false)?;
    Ok(Json(symbols))
}

async fn list_active_symbols(
    Path(exchange): Path<String>,
    Query(q): Query<PageQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Symbol>>> {
    let page = q.pagination()?;
    let symbols = state
        .symbol_service
        .list_symbols(&exchange, Some(page), true)?;
    Ok(Json(symbols))
}

async fn list_all_active_symbols(
    Path(exchange): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Symbol>>> {
    let symbols = state.symbol_service.list_symbols(&exchange, None, true)?;
    Ok(Json(symbols))
}

async fn get_symbol(
    Path((exchange, symbol)): Path<(String, String)>,
    Query(q): Query<MarketTypeQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Symbol>> {
    let symbol = state
        .symbol_service
        .get_symbol(&exchange, &symbol, q.market_type()?)?;
    Ok(Json(symbol))
}

async fn add_symbol(
    Path(exchange): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(input): Json<AddSymbol>,
) -> ApiResult<Json<Symbol>> {
    let symbol = state.symbol_service.add_symbol(&exchange, input).await?;
    Ok(Json(symbol))
}

async fn delete_symbol(
    Path((exchange, symbol)): Path<(String, String)>,
    Query(q): Query<MarketTypeQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state
        .symbol_service
        .delete_symbol(&exchange, &symbol, q.market_type()?)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn revoke_symbol(
    Path((exchange, symbol)): Path<(String, String)>,
    Query(q): Query<MarketTypeQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Symbol>> {
    let symbol = state
        .symbol_service
        .revoke_symbol(&exchange, &symbol, q.market_type()?)
        .await?;
    Ok(Json(symbol))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/exchanges/{exchange}/symbols",
            get(list_symbols).post(add_symbol),
        )
        .route("/exchanges/{exchange}/symbols-list", get(list_all_symbols))
        .route("/exchanges/{exchange}/active-symbols", get(list_active_symbols))
        .route(
            "/exchanges/{exchange}/active-symbols-list",
            get(list_all_active_symbols),
        )
        .route(
            "/exchanges/{exchange}/symbols/{symbol}",
            get(get_symbol).delete(delete_symbol),
        )
        .route(
            "/exchanges/{exchange}/symbols/{symbol}/revoke",
            post(revoke_symbol),
        )
}
