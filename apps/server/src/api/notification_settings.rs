use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use symbolsync_core::notifications::{NotificationSettingsUpdate, NotificationSettingsView};

use crate::{error::ApiResult, main_lib::AppState};

async fn get_settings(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<NotificationSettingsView>> {
    Ok(Json(state.notification_settings_service.get_settings()?))
}

async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(update): Json<NotificationSettingsUpdate>,
) -> ApiResult<Json<NotificationSettingsView>> {
    let view = state
        .notification_settings_service
        .update_settings(update)
        .await?;
    Ok(Json(view))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/notification-settings",
        get(get_settings).put(update_settings),
    )
}
