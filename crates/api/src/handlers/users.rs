//! Handlers for the simulated user directory.

use arcade_db::repositories::SimulatedUserRepo;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::query::EmailParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/users
pub async fn list_users(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let users = SimulatedUserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: users }))
}

/// GET /api/v1/users/search?email=
///
/// Case-insensitive exact match on email.
pub async fn find_by_email(
    State(state): State<AppState>,
    Query(params): Query<EmailParams>,
) -> AppResult<impl IntoResponse> {
    let email = params.email.trim();
    if email.is_empty() {
        return Err(AppError::BadRequest("email must not be empty".into()));
    }
    let user = SimulatedUserRepo::find_by_email(&state.pool, email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No simulated user with email {email}")))?;
    Ok(Json(DataResponse { data: user }))
}
