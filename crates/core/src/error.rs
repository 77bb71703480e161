use crate::types::DbId;

/// Errors that abort a core operation.
///
/// Lease contention is deliberately absent: a held lease or a non-holder
/// release are ordinary outcomes and come back as variants of
/// [`LeaseResult`](crate::lease::LeaseResult),
/// [`ReleaseResult`](crate::lease::ReleaseResult) and
/// [`ApplyResult`](crate::lease::ApplyResult).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The persistent store could not complete the statement. Nothing was
    /// applied; the caller decides whether to retry.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}
