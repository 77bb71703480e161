use axum::routing::{get, post};
use axum::Router;

use crate::handlers::presence;
use crate::state::AppState;

/// Presence routes mounted at `/presence`.
///
/// ```text
/// POST /heartbeat          -> heartbeat
/// GET  /active             -> list_active
/// GET  /active/count       -> count_active
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/heartbeat", post(presence::heartbeat))
        .route("/active", get(presence::list_active))
        .route("/active/count", get(presence::count_active))
}
