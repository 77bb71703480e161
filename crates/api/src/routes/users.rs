use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Simulated user routes mounted at `/users`.
///
/// ```text
/// GET /                    -> list_users
/// GET /search?email=       -> find_by_email
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users))
        .route("/search", get(users::find_by_email))
}
