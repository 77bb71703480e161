//! Presence heartbeat model.

use arcade_core::presence::PresenceRecord;
use arcade_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `presence` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Presence {
    pub session_id: String,
    pub last_heartbeat: Timestamp,
}

impl From<Presence> for PresenceRecord {
    fn from(row: Presence) -> Self {
        Self {
            session_id: row.session_id,
            last_heartbeat: row.last_heartbeat,
        }
    }
}
