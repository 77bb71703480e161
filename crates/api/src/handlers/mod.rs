//! Request handlers.
//!
//! Each submodule extracts the caller identity and keys, calls one core
//! operation or repository method, and serializes the typed result.

pub mod game;
pub mod lease;
pub mod lease_events;
pub mod presence;
pub mod users;
