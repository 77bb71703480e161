//! Route definitions for games and their edit leases.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{game, lease};
use crate::state::AppState;

/// Game routes mounted at `/games`.
///
/// ```text
/// POST   /                 -> create_game
/// GET    /{id}             -> get_game
/// PUT    /{id}             -> update_game
/// POST   /{id}/lease       -> acquire_lease
/// DELETE /{id}/lease       -> release_lease
/// GET    /{id}/lease       -> get_lease
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(game::create_game))
        .route("/{id}", get(game::get_game).put(game::update_game))
        .route(
            "/{id}/lease",
            post(lease::acquire_lease)
                .delete(lease::release_lease)
                .get(lease::get_lease),
        )
}
