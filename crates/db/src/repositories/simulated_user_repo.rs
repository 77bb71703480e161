//! Repository for the `simulated_users` table.

use sqlx::PgPool;

use crate::models::simulated_user::SimulatedUser;

const COLUMNS: &str = "id, name, email, created_at";

/// Read access to the seeded simulated users.
pub struct SimulatedUserRepo;

impl SimulatedUserRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<SimulatedUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM simulated_users ORDER BY id");
        sqlx::query_as::<_, SimulatedUser>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a simulated user by email (case-insensitive).
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<SimulatedUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM simulated_users WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, SimulatedUser>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
