//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod game_repo;
pub mod lease_event_repo;
pub mod presence_repo;
pub mod simulated_user_repo;

pub use game_repo::GameRepo;
pub use lease_event_repo::LeaseEventRepo;
pub use presence_repo::PresenceRepo;
pub use simulated_user_repo::SimulatedUserRepo;
