//! Repository for the `presence` table.

use arcade_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::presence::Presence;

/// Provides heartbeat upserts and windowed reads.
pub struct PresenceRepo;

impl PresenceRepo {
    /// Insert or overwrite the session's heartbeat. Last write wins, even
    /// if `at` is older than the stored value.
    pub async fn upsert(
        pool: &PgPool,
        session_id: &str,
        at: Timestamp,
    ) -> Result<Presence, sqlx::Error> {
        sqlx::query_as::<_, Presence>(
            "INSERT INTO presence (session_id, last_heartbeat) VALUES ($1, $2) \
             ON CONFLICT (session_id) DO UPDATE SET last_heartbeat = EXCLUDED.last_heartbeat \
             RETURNING session_id, last_heartbeat",
        )
        .bind(session_id)
        .bind(at)
        .fetch_one(pool)
        .await
    }

    /// All sessions with `last_heartbeat >= cutoff`, ordered by session id.
    pub async fn list_since(pool: &PgPool, cutoff: Timestamp) -> Result<Vec<Presence>, sqlx::Error> {
        sqlx::query_as::<_, Presence>(
            "SELECT session_id, last_heartbeat FROM presence \
             WHERE last_heartbeat >= $1 \
             ORDER BY session_id",
        )
        .bind(cutoff)
        .fetch_all(pool)
        .await
    }

    pub async fn count_since(pool: &PgPool, cutoff: Timestamp) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM presence WHERE last_heartbeat >= $1")
                .bind(cutoff)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
