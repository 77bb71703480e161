pub mod game;
pub mod health;
pub mod lease_events;
pub mod presence;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /games                                      create (POST)
/// /games/{id}                                 get, edit (PUT, lease-guarded)
/// /games/{id}/lease                           acquire (POST), release (DELETE), inspect (GET)
///
/// /presence/heartbeat                         record heartbeat (POST)
/// /presence/active                            sessions active within ?window_secs
/// /presence/active/count                      number of active sessions
///
/// /users                                      list simulated users
/// /users/search                               find simulated user by ?email
///
/// /lease-events/recent                        newest lease events (?limit)
/// ```
///
/// Every lease and edit route requires the `x-user-id` header.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/games", game::router())
        .nest("/presence", presence::router())
        .nest("/users", users::router())
        .nest("/lease-events", lease_events::router())
}
