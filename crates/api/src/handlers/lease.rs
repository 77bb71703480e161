//! Handlers for game edit leases.
//!
//! Acquire, release and inspect map one-to-one onto [`LeaseManager`]
//! operations. Contention comes back from the core as a typed outcome and is
//! turned into 409 / 403 here.
//!
//! [`LeaseManager`]: arcade_core::lease::LeaseManager

use arcade_core::collaboration::lease_events;
use arcade_core::error::CoreError;
use arcade_core::lease::{LeaseResult, ReleaseResult};
use arcade_core::types::DbId;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::handlers::lease_events::record;
use crate::middleware::identity::CallerId;
use crate::middleware::json::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for acquiring a lease. The body itself is optional.
#[derive(Debug, Default, Deserialize)]
pub struct AcquireLeaseRequest {
    pub ttl_secs: Option<i64>,
}

/// POST /api/v1/games/{id}/lease
///
/// Take or renew the edit lease on a game. Returns 409 with the current
/// holder if someone else holds a live lease.
pub async fn acquire_lease(
    caller: CallerId,
    State(state): State<AppState>,
    Path(game_id): Path<DbId>,
    body: Option<AppJson<AcquireLeaseRequest>>,
) -> AppResult<impl IntoResponse> {
    let ttl_secs = body
        .and_then(|AppJson(req)| req.ttl_secs)
        .unwrap_or(state.config.default_lease_ttl_secs);

    match state.leases().acquire(game_id, caller.as_str(), ttl_secs).await? {
        LeaseResult::Acquired { resource, lease } => {
            tracing::info!(
                game_id,
                holder_id = %caller.as_str(),
                ttl_secs,
                expires_at = ?lease.expires_at,
                "Lease acquired"
            );
            record(
                &state,
                game_id,
                caller.as_str(),
                lease_events::ACQUIRED,
                Some(json!({ "ttl_secs": ttl_secs, "expires_at": lease.expires_at })),
            )
            .await;
            Ok(Json(DataResponse {
                data: json!({ "lease": lease, "game": resource }),
            }))
        }
        LeaseResult::Conflict(conflict) => {
            tracing::info!(
                game_id,
                holder_id = %caller.as_str(),
                current_holder = ?conflict.holder_id,
                "Lease acquire lost"
            );
            record(
                &state,
                game_id,
                caller.as_str(),
                lease_events::CONFLICT,
                Some(json!({
                    "current_holder": conflict.holder_id,
                    "expires_at": conflict.expires_at,
                })),
            )
            .await;
            Err(AppError::LeaseHeld(conflict))
        }
        LeaseResult::NotFound => Err(game_not_found(game_id)),
    }
}

/// DELETE /api/v1/games/{id}/lease
///
/// Release the lease. Only the recorded holder can release, even after expiry.
pub async fn release_lease(
    caller: CallerId,
    State(state): State<AppState>,
    Path(game_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    match state.leases().release(game_id, caller.as_str()).await? {
        ReleaseResult::Released => {
            tracing::info!(game_id, holder_id = %caller.as_str(), "Lease released");
            record(&state, game_id, caller.as_str(), lease_events::RELEASED, None).await;
            Ok(Json(DataResponse {
                data: json!({ "released": true }),
            }))
        }
        ReleaseResult::Forbidden => {
            tracing::info!(
                game_id,
                holder_id = %caller.as_str(),
                "Lease release refused: caller is not the holder"
            );
            record(&state, game_id, caller.as_str(), lease_events::FORBIDDEN, None).await;
            Err(AppError::Core(CoreError::Forbidden(
                "You do not hold the lease on this game".into(),
            )))
        }
        ReleaseResult::NotFound => Err(game_not_found(game_id)),
    }
}

/// GET /api/v1/games/{id}/lease
///
/// Current lease state, with expired leases reported as unlocked.
pub async fn get_lease(
    State(state): State<AppState>,
    Path(game_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let lease = state.leases().inspect(game_id).await?;
    Ok(Json(DataResponse { data: lease }))
}

pub(crate) fn game_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Game", id })
}
