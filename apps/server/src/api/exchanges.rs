use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use symbolsync_core::exchanges::{Exchange, NewExchange};

use crate::{error::ApiResult, main_lib::AppState};

async fn list_exchanges(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Exchange>>> {
    let exchanges = state.exchange_service.list_exchanges()?;
    Ok(Json(exchanges))
}

async fn supported_exchanges(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.exchange_service.supported_exchanges())
}

async fn get_exchange(
    Path(exchange): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Exchange>> {
    Ok(Json(state.exchange_service.get_exchange(&exchange)?))
}

async fn create_exchange(
    State(state): State<Arc<AppState>>,
    Json(new_exchange): Json<NewExchange>,
) -> ApiResult<(StatusCode, Json<Exchange>)> {
    let exchange = state.exchange_service.create_exchange(new_exchange).await?;
    Ok((StatusCode::CREATED, Json(exchange)))
}

async fn delete_exchange(
    Path(exchange): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.exchange_service.delete_exchange(&exchange).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/exchanges", get(list_exchanges).post(create_exchange))
        .route("/exchanges/supported", get(supported_exchanges))
        .route(
            "/exchanges/{exchange}",
            get(get_exchange).delete(delete_exchange),
        )
}
