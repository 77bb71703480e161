//! Repository for the append-only `lease_events` table.

use sqlx::PgPool;

use crate::models::lease_event::{CreateLeaseEvent, LeaseEvent};

const COLUMNS: &str = "id, game_id, holder_id, event, details, created_at";

/// Default number of events returned by [`LeaseEventRepo::recent`].
pub const DEFAULT_RECENT_LIMIT: i64 = 20;

/// Upper bound on [`LeaseEventRepo::recent`].
pub const MAX_RECENT_LIMIT: i64 = 100;

/// Clamp a caller-supplied limit into `1..=MAX_RECENT_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .clamp(1, MAX_RECENT_LIMIT)
}

pub struct LeaseEventRepo;

impl LeaseEventRepo {
    pub async fn insert(pool: &PgPool, input: &CreateLeaseEvent) -> Result<LeaseEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO lease_events (game_id, holder_id, event, details)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LeaseEvent>(&query)
            .bind(input.game_id)
            .bind(&input.holder_id)
            .bind(input.event)
            .bind(&input.details)
            .fetch_one(pool)
            .await
    }

    /// Newest events first.
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<LeaseEvent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lease_events ORDER BY id DESC LIMIT $1");
        sqlx::query_as::<_, LeaseEvent>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None), DEFAULT_RECENT_LIMIT);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(-4)), 1);
        assert_eq!(clamp_limit(Some(50)), 50);
        assert_eq!(clamp_limit(Some(10_000)), MAX_RECENT_LIMIT);
    }
}
