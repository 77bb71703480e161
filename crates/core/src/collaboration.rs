//! Edit-coordination constants and validation.
//!
//! Lives in `core` so the lease manager, the presence tracker, the store
//! implementations and the HTTP layer all agree on the same TTL bounds,
//! presence window and identifier rules.

// ---------------------------------------------------------------------------
// Lease TTL constants
// ---------------------------------------------------------------------------

/// Lease duration used when the caller does not ask for one (5 minutes).
pub const DEFAULT_LEASE_TTL_SECS: i64 = 300;

/// Shortest lease a caller may request.
pub const MIN_LEASE_TTL_SECS: i64 = 1;

/// Longest lease a caller may request (4 hours).
pub const MAX_LEASE_TTL_SECS: i64 = 14_400;

// ---------------------------------------------------------------------------
// Presence constants
// ---------------------------------------------------------------------------

/// Window used by "who is active" queries when none is given.
pub const DEFAULT_PRESENCE_WINDOW_SECS: i64 = 15;

/// Largest window a caller may query (1 day).
pub const MAX_PRESENCE_WINDOW_SECS: i64 = 86_400;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Upper bound on holder and session identifiers.
pub const MAX_IDENTITY_LEN: usize = 128;

/// Lease activity kinds recorded in the lease event log.
pub mod lease_events {
    pub const ACQUIRED: &str = "acquired";
    pub const CONFLICT: &str = "conflict";
    pub const RELEASED: &str = "released";
    pub const FORBIDDEN: &str = "forbidden";
    pub const EDITED: &str = "edited";
    pub const EDIT_REJECTED: &str = "edit_rejected";
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn validate_identity(kind: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{kind} must not be empty"));
    }
    if value.len() > MAX_IDENTITY_LEN {
        return Err(format!(
            "{kind} must be at most {MAX_IDENTITY_LEN} bytes, got {}",
            value.len()
        ));
    }
    Ok(())
}

/// Validate the identity of a lease holder.
pub fn validate_holder_id(holder_id: &str) -> Result<(), String> {
    validate_identity("holder_id", holder_id)
}

/// Validate a presence session identifier.
pub fn validate_session_id(session_id: &str) -> Result<(), String> {
    validate_identity("session_id", session_id)
}

/// Validate a requested lease TTL in seconds.
pub fn validate_lease_ttl(secs: i64) -> Result<(), String> {
    if secs < MIN_LEASE_TTL_SECS {
        return Err(format!(
            "Lease TTL must be at least {MIN_LEASE_TTL_SECS} second(s), got {secs}"
        ));
    }
    if secs > MAX_LEASE_TTL_SECS {
        return Err(format!(
            "Lease TTL must be at most {MAX_LEASE_TTL_SECS} seconds, got {secs}"
        ));
    }
    Ok(())
}

/// Validate a presence window in seconds. Zero is allowed and matches only
/// heartbeats recorded at the evaluating instant.
pub fn validate_presence_window(secs: i64) -> Result<(), String> {
    if secs < 0 {
        return Err(format!("Presence window must not be negative, got {secs}"));
    }
    if secs > MAX_PRESENCE_WINDOW_SECS {
        return Err(format!(
            "Presence window must be at most {MAX_PRESENCE_WINDOW_SECS} seconds, got {secs}"
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
