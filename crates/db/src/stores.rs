//! PostgreSQL implementations of the core store traits.
//!
//! Thin adapters: each trait method is exactly one repository call, so the
//! single-statement atomicity the core relies on is the repository SQL's.

use arcade_core::error::CoreError;
use arcade_core::lease::{Lease, LeaseStore};
use arcade_core::presence::{PresenceRecord, PresenceStore};
use arcade_core::types::{DbId, Timestamp};
use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::game::{Game, UpdateGame};
use crate::repositories::{GameRepo, PresenceRepo};

fn unavailable(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Store statement failed");
    CoreError::StoreUnavailable(err.to_string())
}

// ---------------------------------------------------------------------------
// Game leases
// ---------------------------------------------------------------------------

/// Lease store over the lease columns of the `games` table.
#[derive(Clone)]
pub struct PgGameLeaseStore {
    pool: PgPool,
}

impl PgGameLeaseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeaseStore for PgGameLeaseStore {
    const ENTITY: &'static str = "Game";
    type Resource = Game;
    type Mutation = UpdateGame;

    async fn try_acquire(
        &self,
        resource_id: DbId,
        holder_id: &str,
        now: Timestamp,
        expires_at: Timestamp,
    ) -> Result<Option<(Game, Lease)>, CoreError> {
        let game = GameRepo::try_acquire_lease(&self.pool, resource_id, holder_id, now, expires_at)
            .await
            .map_err(unavailable)?;
        Ok(game.map(|game| {
            let lease = game.lease();
            (game, lease)
        }))
    }

    async fn try_release(&self, resource_id: DbId, holder_id: &str) -> Result<bool, CoreError> {
        GameRepo::release_lease(&self.pool, resource_id, holder_id)
            .await
            .map_err(unavailable)
    }

    async fn load_lease(&self, resource_id: DbId) -> Result<Option<Lease>, CoreError> {
        GameRepo::find_lease(&self.pool, resource_id)
            .await
            .map_err(unavailable)
    }

    async fn try_apply(
        &self,
        resource_id: DbId,
        holder_id: &str,
        now: Timestamp,
        require_lease: bool,
        mutation: &UpdateGame,
    ) -> Result<Option<Game>, CoreError> {
        GameRepo::update_if_lease_allows(
            &self.pool,
            resource_id,
            holder_id,
            now,
            require_lease,
            mutation,
        )
        .await
        .map_err(unavailable)
    }
}

// ---------------------------------------------------------------------------
// Presence
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct PgPresenceStore {
    pool: PgPool,
}

impl PgPresenceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PresenceStore for PgPresenceStore {
    async fn upsert_heartbeat(
        &self,
        session_id: &str,
        at: Timestamp,
    ) -> Result<PresenceRecord, CoreError> {
        PresenceRepo::upsert(&self.pool, session_id, at)
            .await
            .map(PresenceRecord::from)
            .map_err(unavailable)
    }

    async fn active_since(&self, cutoff: Timestamp) -> Result<Vec<PresenceRecord>, CoreError> {
        let rows = PresenceRepo::list_since(&self.pool, cutoff)
            .await
            .map_err(unavailable)?;
        Ok(rows.into_iter().map(PresenceRecord::from).collect())
    }

    async fn count_active_since(&self, cutoff: Timestamp) -> Result<i64, CoreError> {
        PresenceRepo::count_since(&self.pool, cutoff)
            .await
            .map_err(unavailable)
    }
}
