//! Handlers for the `/games` resource.
//!
//! Only the surface the edit lease needs: create, fetch and the
//! lease-guarded edit.

use arcade_core::collaboration::lease_events;
use arcade_core::error::CoreError;
use arcade_core::lease::ApplyResult;
use arcade_core::types::DbId;
use arcade_db::models::game::{CreateGame, UpdateGame};
use arcade_db::repositories::GameRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::lease::game_not_found;
use crate::handlers::lease_events::record;
use crate::middleware::identity::CallerId;
use crate::middleware::json::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

fn validation(err: validator::ValidationErrors) -> AppError {
    AppError::Core(CoreError::Validation(err.to_string()))
}

/// POST /api/v1/games
pub async fn create_game(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateGame>,
) -> AppResult<impl IntoResponse> {
    input.validate().map_err(validation)?;
    let game = GameRepo::create(&state.pool, &input).await?;
    tracing::info!(game_id = game.id, name = %game.name, "Game created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: game })))
}

/// GET /api/v1/games/{id}
pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let game = GameRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| game_not_found(id))?;
    Ok(Json(DataResponse { data: game }))
}

/// PUT /api/v1/games/{id}
///
/// Apply an edit unless another caller holds a live lease. Under the strict
/// edit policy the caller must hold the lease. Editing never renews it.
pub async fn update_game(
    caller: CallerId,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateGame>,
) -> AppResult<impl IntoResponse> {
    input.validate().map_err(validation)?;
    if input.is_empty() {
        return Err(AppError::BadRequest("No fields to update".into()));
    }

    match state.leases().apply_if_held(id, caller.as_str(), &input).await? {
        ApplyResult::Applied(game) => {
            tracing::info!(game_id = id, holder_id = %caller.as_str(), "Game edited");
            record(&state, id, caller.as_str(), lease_events::EDITED, None).await;
            Ok(Json(DataResponse { data: game }))
        }
        ApplyResult::Conflict(conflict) => {
            tracing::info!(
                game_id = id,
                holder_id = %caller.as_str(),
                current_holder = ?conflict.holder_id,
                "Edit rejected: lease held elsewhere"
            );
            record(
                &state,
                id,
                caller.as_str(),
                lease_events::EDIT_REJECTED,
                Some(json!({ "current_holder": conflict.holder_id })),
            )
            .await;
            Err(AppError::LeaseHeld(conflict))
        }
        ApplyResult::NotFound => Err(game_not_found(id)),
    }
}
