//! Simulated user model.
//!
//! Simulated users are the identities the concurrency simulator hands out as
//! lease holders and presence sessions.

use arcade_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `simulated_users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SimulatedUser {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub created_at: Timestamp,
}
