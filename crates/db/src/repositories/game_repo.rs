//! Repository for the `games` table and its lease columns.
//!
//! Every lease transition is one `UPDATE` whose precondition sits in the
//! `WHERE` clause. Under READ COMMITTED a concurrent writer that committed
//! first makes PostgreSQL re-evaluate the clause against the new row
//! version, so exactly one of two racing acquires matches.

use arcade_core::lease::Lease;
use arcade_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::game::{CreateGame, Game, UpdateGame};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, released_on, rating, lock_holder, lock_expires_at, \
                       created_at, updated_at";

/// Provides CRUD and lease operations for games.
pub struct GameRepo;

impl GameRepo {
    /// Insert a new, unlocked game.
    pub async fn create(pool: &PgPool, input: &CreateGame) -> Result<Game, sqlx::Error> {
        let query = format!(
            "INSERT INTO games (name, released_on, rating)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(&input.name)
            .bind(input.released_on)
            .bind(input.rating)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE id = $1");
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Take the lease if it is free, expired at `now`, or already ours.
    ///
    /// Returns `None` if the precondition failed or the game does not exist.
    pub async fn try_acquire_lease(
        pool: &PgPool,
        id: DbId,
        holder_id: &str,
        now: Timestamp,
        expires_at: Timestamp,
    ) -> Result<Option<Game>, sqlx::Error> {
        let query = format!(
            "UPDATE games SET lock_holder = $2, lock_expires_at = $4
             WHERE id = $1
               AND (lock_holder IS NULL
                    OR lock_expires_at IS NULL
                    OR lock_expires_at <= $3
                    OR lock_holder = $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .bind(holder_id)
            .bind(now)
            .bind(expires_at)
            .fetch_optional(pool)
            .await
    }

    /// Clear the lease if `holder_id` is the recorded holder.
    ///
    /// Returns `true` if the lease was cleared.
    pub async fn release_lease(
        pool: &PgPool,
        id: DbId,
        holder_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE games SET lock_holder = NULL, lock_expires_at = NULL \
             WHERE id = $1 AND lock_holder = $2",
        )
        .bind(id)
        .bind(holder_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Read only the lease columns of a game.
    pub async fn find_lease(pool: &PgPool, id: DbId) -> Result<Option<Lease>, sqlx::Error> {
        let row: Option<(DbId, Option<String>, Option<Timestamp>)> =
            sqlx::query_as("SELECT id, lock_holder, lock_expires_at FROM games WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?;
        Ok(row.map(|(resource_id, holder_id, expires_at)| Lease {
            resource_id,
            holder_id,
            expires_at,
        }))
    }

    /// Apply an edit unless another holder has a live lease.
    ///
    /// With `require_lease` the caller must itself hold a live lease. The
    /// lease columns are never touched. Returns `None` if the precondition
    /// failed or the game does not exist.
    pub async fn update_if_lease_allows(
        pool: &PgPool,
        id: DbId,
        holder_id: &str,
        now: Timestamp,
        require_lease: bool,
        input: &UpdateGame,
    ) -> Result<Option<Game>, sqlx::Error> {
        let query = format!(
            "UPDATE games SET
                name = COALESCE($5, name),
                released_on = COALESCE($6, released_on),
                rating = COALESCE($7, rating),
                updated_at = $3
             WHERE id = $1
               AND ((lock_holder = $2 AND lock_expires_at > $3)
                    OR (NOT $4
                        AND (lock_holder IS NULL
                             OR lock_expires_at IS NULL
                             OR lock_expires_at <= $3)))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .bind(holder_id)
            .bind(now)
            .bind(require_lease)
            .bind(&input.name)
            .bind(input.released_on)
            .bind(input.rating)
            .fetch_optional(pool)
            .await
    }
}
