//! Time-bounded exclusive edit leases.
//!
//! A lease lives on the resource row itself (`holder_id`, `expires_at`) and
//! is only ever changed by a single conditional write whose precondition is
//! part of the statement. There is no in-process lock: two server processes
//! racing for the same resource are serialized by the store's row atomicity,
//! and whichever write commits first wins.
//!
//! Expiry is lazy. Nothing sweeps expired leases; an expired lease simply
//! stops satisfying [`Lease::is_held_at`] and the next `acquire` takes it
//! over.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::TimeDelta;
use serde::Serialize;

use crate::clock::Clock;
use crate::collaboration::{validate_holder_id, validate_lease_ttl};
use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Lease state
// ---------------------------------------------------------------------------

/// The lease columns of a lockable resource, exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lease {
    pub resource_id: DbId,
    pub holder_id: Option<String>,
    pub expires_at: Option<Timestamp>,
}

impl Lease {
    pub fn unlocked(resource_id: DbId) -> Self {
        Self {
            resource_id,
            holder_id: None,
            expires_at: None,
        }
    }

    /// A lease is held iff it names a holder and expires strictly after `now`.
    pub fn is_held_at(&self, now: Timestamp) -> bool {
        self.holder_id.is_some() && self.expires_at.is_some_and(|at| at > now)
    }

    pub fn is_held_by(&self, holder_id: &str, now: Timestamp) -> bool {
        self.is_held_at(now) && self.holder_id.as_deref() == Some(holder_id)
    }

    /// The logical state at `now`, with expired leases reported as unlocked.
    pub fn state_at(&self, now: Timestamp) -> LeaseState {
        match (&self.holder_id, self.expires_at) {
            (Some(holder_id), Some(expires_at)) if expires_at > now => LeaseState::Held {
                holder_id: holder_id.clone(),
                expires_at,
            },
            _ => LeaseState::Unlocked,
        }
    }
}

/// Logical lease state as seen by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LeaseState {
    Unlocked,
    Held {
        holder_id: String,
        expires_at: Timestamp,
    },
}

/// Who was in the way when a conditional write lost.
///
/// Both fields are `None` when the lease was freed between the losing write
/// and the diagnostic read, or when a strict edit found no lease at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaseConflict {
    pub holder_id: Option<String>,
    pub expires_at: Option<Timestamp>,
}

impl LeaseConflict {
    fn observed(lease: &Lease, now: Timestamp) -> Self {
        match lease.state_at(now) {
            LeaseState::Held {
                holder_id,
                expires_at,
            } => Self {
                holder_id: Some(holder_id),
                expires_at: Some(expires_at),
            },
            LeaseState::Unlocked => Self {
                holder_id: None,
                expires_at: None,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Operation outcomes
// ---------------------------------------------------------------------------

/// Outcome of [`LeaseManager::acquire`].
#[derive(Debug, Clone, PartialEq)]
pub enum LeaseResult<R> {
    /// The caller now holds the lease; `resource` is the row after the write.
    Acquired { resource: R, lease: Lease },
    /// Someone else holds a live lease.
    Conflict(LeaseConflict),
    NotFound,
}

/// Outcome of [`LeaseManager::release`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseResult {
    Released,
    /// The caller is not the recorded holder. The row was not touched.
    Forbidden,
    NotFound,
}

/// Outcome of [`LeaseManager::apply_if_held`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyResult<R> {
    Applied(R),
    Conflict(LeaseConflict),
    NotFound,
}

/// Whether an edit needs a live lease held by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditPolicy {
    /// Edits go through when the editor holds the lease or when nobody holds
    /// a live one.
    #[default]
    Permissive,
    /// Edits go through only when the editor holds a live lease.
    Strict,
}

impl EditPolicy {
    pub fn requires_lease(self) -> bool {
        matches!(self, Self::Strict)
    }
}

// ---------------------------------------------------------------------------
// Store interface
// ---------------------------------------------------------------------------

/// The store operations the lease manager needs.
///
/// Every `try_*` method must be a single atomic statement with its
/// precondition evaluated inside the write. Implementations must not read,
/// compare in application code and then write.
#[async_trait]
pub trait LeaseStore: Send + Sync {
    /// Entity name used in not-found errors.
    const ENTITY: &'static str;

    /// The resource row returned after a successful write.
    type Resource: Send;
    /// The field changes an edit applies.
    type Mutation: Sync;

    /// Set `holder_id` and `expires_at` if the lease is unlocked, expired at
    /// `now`, or already held by `holder_id`. Returns `None` when the
    /// precondition failed or the resource does not exist.
    async fn try_acquire(
        &self,
        resource_id: DbId,
        holder_id: &str,
        now: Timestamp,
        expires_at: Timestamp,
    ) -> Result<Option<(Self::Resource, Lease)>, CoreError>;

    /// Clear the lease if the stored holder is `holder_id`. Returns `false`
    /// when nothing was cleared.
    async fn try_release(&self, resource_id: DbId, holder_id: &str) -> Result<bool, CoreError>;

    /// Read the stored lease columns, or `None` if the resource is missing.
    async fn load_lease(&self, resource_id: DbId) -> Result<Option<Lease>, CoreError>;

    /// Apply `mutation` if `holder_id` holds a live lease, or, when
    /// `require_lease` is false, if no live lease exists. The lease columns
    /// are left as they are.
    async fn try_apply(
        &self,
        resource_id: DbId,
        holder_id: &str,
        now: Timestamp,
        require_lease: bool,
        mutation: &Self::Mutation,
    ) -> Result<Option<Self::Resource>, CoreError>;
}

// ---------------------------------------------------------------------------
// LeaseManager
// ---------------------------------------------------------------------------

/// Acquire / release / inspect / apply-if-held on top of a [`LeaseStore`].
///
/// Holds no state between calls beyond its store handle and clock, so it is
/// fine to build one per request.
pub struct LeaseManager<S> {
    store: S,
    clock: Arc<dyn Clock>,
    policy: EditPolicy,
}

impl<S: LeaseStore> LeaseManager<S> {
    pub fn new(store: S, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            policy: EditPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: EditPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Take or renew the lease on `resource_id` for `ttl_secs` seconds.
    ///
    /// Re-acquiring a lease you already hold extends it from now. Losing to
    /// a live holder is reported as [`LeaseResult::Conflict`].
    pub async fn acquire(
        &self,
        resource_id: DbId,
        holder_id: &str,
        ttl_secs: i64,
    ) -> Result<LeaseResult<S::Resource>, CoreError> {
        validate_holder_id(holder_id).map_err(CoreError::Validation)?;
        validate_lease_ttl(ttl_secs).map_err(CoreError::Validation)?;

        let now = self.clock.now();
        let expires_at = now + TimeDelta::seconds(ttl_secs);

        if let Some((resource, lease)) = self
            .store
            .try_acquire(resource_id, holder_id, now, expires_at)
            .await?
        {
            return Ok(LeaseResult::Acquired { resource, lease });
        }

        // The write already decided; this read only explains the loss.
        Ok(match self.store.load_lease(resource_id).await? {
            None => LeaseResult::NotFound,
            Some(lease) => LeaseResult::Conflict(LeaseConflict::observed(&lease, now)),
        })
    }

    /// Clear the lease if `holder_id` is the recorded holder, expired or not.
    pub async fn release(
        &self,
        resource_id: DbId,
        holder_id: &str,
    ) -> Result<ReleaseResult, CoreError> {
        validate_holder_id(holder_id).map_err(CoreError::Validation)?;

        if self.store.try_release(resource_id, holder_id).await? {
            return Ok(ReleaseResult::Released);
        }

        Ok(match self.store.load_lease(resource_id).await? {
            None => ReleaseResult::NotFound,
            Some(_) => ReleaseResult::Forbidden,
        })
    }

    /// Current lease state of `resource_id` without changing it.
    pub async fn inspect(&self, resource_id: DbId) -> Result<LeaseState, CoreError> {
        let now = self.clock.now();
        self.store
            .load_lease(resource_id)
            .await?
            .map(|lease| lease.state_at(now))
            .ok_or(CoreError::NotFound {
                entity: S::ENTITY,
                id: resource_id,
            })
    }

    /// Apply `mutation` unless someone other than `holder_id` holds a live
    /// lease. Under [`EditPolicy::Strict`] the caller must hold it.
    ///
    /// Editing never renews the lease.
    pub async fn apply_if_held(
        &self,
        resource_id: DbId,
        holder_id: &str,
        mutation: &S::Mutation,
    ) -> Result<ApplyResult<S::Resource>, CoreError> {
        validate_holder_id(holder_id).map_err(CoreError::Validation)?;

        let now = self.clock.now();
        if let Some(resource) = self
            .store
            .try_apply(
                resource_id,
                holder_id,
                now,
                self.policy.requires_lease(),
                mutation,
            )
            .await?
        {
            return Ok(ApplyResult::Applied(resource));
        }

        Ok(match self.store.load_lease(resource_id).await? {
            None => ApplyResult::NotFound,
            Some(lease) => ApplyResult::Conflict(LeaseConflict::observed(&lease, now)),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
