//! Lease activity log models (append-only, no `updated_at`).

use arcade_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `lease_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeaseEvent {
    pub id: DbId,
    pub game_id: DbId,
    pub holder_id: String,
    pub event: String,
    pub details: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

/// DTO for appending a lease event.
#[derive(Debug, Clone)]
pub struct CreateLeaseEvent {
    pub game_id: DbId,
    pub holder_id: String,
    pub event: &'static str,
    pub details: Option<serde_json::Value>,
}
