//! Handlers for the lease activity log.

use arcade_core::types::DbId;
use arcade_db::models::lease_event::CreateLeaseEvent;
use arcade_db::repositories::lease_event_repo::clamp_limit;
use arcade_db::repositories::LeaseEventRepo;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::query::LimitParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/lease-events/recent?limit=20
///
/// Newest lease events first.
pub async fn list_recent(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let events = LeaseEventRepo::recent(&state.pool, clamp_limit(params.limit)).await?;
    Ok(Json(DataResponse { data: events }))
}

/// Append a lease event after the deciding write has committed.
///
/// The log is informational. A failed insert is logged and swallowed so it
/// never changes the outcome the caller already got from the lease write.
pub(crate) async fn record(
    state: &AppState,
    game_id: DbId,
    holder_id: &str,
    event: &'static str,
    details: Option<serde_json::Value>,
) {
    let input = CreateLeaseEvent {
        game_id,
        holder_id: holder_id.to_string(),
        event,
        details,
    };
    if let Err(e) = LeaseEventRepo::insert(&state.pool, &input).await {
        tracing::warn!(
            game_id,
            holder_id = %holder_id,
            event,
            error = %e,
            "Failed to record lease event"
        );
    }
}
