//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for inserts and patches where the table takes writes

pub mod game;
pub mod lease_event;
pub mod presence;
pub mod simulated_user;
