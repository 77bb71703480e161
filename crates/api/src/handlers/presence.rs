//! Handlers for heartbeat presence.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::AppResult;
use crate::middleware::json::AppJson;
use crate::query::WindowParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// A missing `session_id` deserializes as empty and fails validation.
#[derive(Debug, Deserialize)]
pub struct HeartbeatRequest {
    #[serde(default)]
    pub session_id: String,
}

/// POST /api/v1/presence/heartbeat
///
/// Record that a session is alive now. Last write wins.
pub async fn heartbeat(
    State(state): State<AppState>,
    AppJson(input): AppJson<HeartbeatRequest>,
) -> AppResult<impl IntoResponse> {
    let record = state.presence().heartbeat(&input.session_id).await?;
    tracing::debug!(session_id = %record.session_id, "Heartbeat");
    Ok(Json(DataResponse {
        data: json!({ "ok": true, "last_heartbeat": record.last_heartbeat }),
    }))
}

/// GET /api/v1/presence/active?window_secs=15
///
/// Sessions heard from within the window, ordered by session id.
pub async fn list_active(
    State(state): State<AppState>,
    Query(params): Query<WindowParams>,
) -> AppResult<impl IntoResponse> {
    let window_secs = params
        .window_secs
        .unwrap_or(state.config.presence_window_secs);
    let active = state.presence().list_active(window_secs).await?;
    Ok(Json(DataResponse { data: active }))
}

/// GET /api/v1/presence/active/count?window_secs=15
pub async fn count_active(
    State(state): State<AppState>,
    Query(params): Query<WindowParams>,
) -> AppResult<impl IntoResponse> {
    let window_secs = params
        .window_secs
        .unwrap_or(state.config.presence_window_secs);
    let active = state.presence().count_active(window_secs).await?;
    Ok(Json(DataResponse {
        data: json!({ "active": active, "window_secs": window_secs }),
    }))
}
