use axum::routing::get;
use axum::Router;

use crate::handlers::lease_events;
use crate::state::AppState;

/// Lease event routes mounted at `/lease-events`.
///
/// ```text
/// GET /recent?limit=       -> list_recent
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/recent", get(lease_events::list_recent))
}
