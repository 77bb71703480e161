//! Arcade domain core.
//!
//! Holds the edit-coordination components (lease manager, presence tracker),
//! the store traits they depend on, and the shared validation rules. This
//! crate has no database or HTTP dependencies; `arcade-db` implements the
//! store traits and `arcade-api` wires everything to HTTP.

pub mod clock;
pub mod collaboration;
pub mod error;
pub mod lease;
pub mod presence;
pub mod types;

#[cfg(test)]
mod testing;
