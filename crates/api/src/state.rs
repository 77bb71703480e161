use std::sync::Arc;

use arcade_core::clock::Clock;
use arcade_core::lease::LeaseManager;
use arcade_core::presence::PresenceTracker;
use arcade_db::stores::{PgGameLeaseStore, PgPresenceStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone. Holds no lease or presence data of its own; every request
/// goes to the database.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: arcade_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Source of "now" for lease expiry and presence windows.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Lease manager over the `games` table, using the configured edit policy.
    pub fn leases(&self) -> LeaseManager<PgGameLeaseStore> {
        LeaseManager::new(PgGameLeaseStore::new(self.pool.clone()), Arc::clone(&self.clock))
            .with_policy(self.config.edit_policy)
    }

    pub fn presence(&self) -> PresenceTracker<PgPresenceStore> {
        PresenceTracker::new(PgPresenceStore::new(self.pool.clone()), Arc::clone(&self.clock))
    }
}
