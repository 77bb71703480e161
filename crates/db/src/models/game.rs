//! Game entity model and DTOs.
//!
//! Every game row carries its own edit lease in the nullable
//! `lock_holder` / `lock_expires_at` pair.

use arcade_core::lease::Lease;
use arcade_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `games` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Game {
    pub id: DbId,
    pub name: String,
    pub released_on: Option<NaiveDate>,
    pub rating: Option<f64>,
    pub lock_holder: Option<String>,
    pub lock_expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Game {
    /// The stored lease columns of this row.
    pub fn lease(&self) -> Lease {
        Lease {
            resource_id: self.id,
            holder_id: self.lock_holder.clone(),
            expires_at: self.lock_expires_at,
        }
    }
}

/// DTO for creating a game. New games start unlocked.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGame {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub released_on: Option<NaiveDate>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,
}

/// DTO for editing a game. All fields are optional; `None` keeps the
/// stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateGame {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub released_on: Option<NaiveDate>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,
}

impl UpdateGame {
    /// `true` when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.released_on.is_none() && self.rating.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_game_rating_out_of_range() {
        let edit = UpdateGame {
            rating: Some(7.5),
            ..Default::default()
        };
        assert!(edit.validate().is_err());
    }

    #[test]
    fn test_update_game_empty_name_rejected() {
        let edit = UpdateGame {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(edit.validate().is_err());
    }

    #[test]
    fn test_update_game_is_empty() {
        assert!(UpdateGame::default().is_empty());
        let edit = UpdateGame {
            rating: Some(4.0),
            ..Default::default()
        };
        assert!(!edit.is_empty());
        assert!(edit.validate().is_ok());
    }
}
