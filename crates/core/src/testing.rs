//! In-memory store doubles for unit tests.
//!
//! Each method takes the mutex once and does its compare and write under
//! it, which is the same single-statement atomicity the PostgreSQL stores
//! get from row locks.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::CoreError;
use crate::lease::{Lease, LeaseStore};
use crate::presence::{PresenceRecord, PresenceStore};
use crate::types::{DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryResource {
    pub id: DbId,
    pub title: String,
}

#[derive(Debug, Clone)]
struct Row {
    title: String,
    lease: Lease,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryLeaseStore {
    rows: Arc<Mutex<HashMap<DbId, Row>>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryLeaseStore {
    pub fn with_resources(ids: &[DbId]) -> Self {
        let rows = ids
            .iter()
            .map(|&id| {
                (
                    id,
                    Row {
                        title: format!("resource-{id}"),
                        lease: Lease::unlocked(id),
                    },
                )
            })
            .collect();
        Self {
            rows: Arc::new(Mutex::new(rows)),
            unavailable: Arc::default(),
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn lease(&self, id: DbId) -> Option<Lease> {
        self.rows.lock().unwrap().get(&id).map(|row| row.lease.clone())
    }

    pub fn title(&self, id: DbId) -> Option<String> {
        self.rows.lock().unwrap().get(&id).map(|row| row.title.clone())
    }

    fn check(&self) -> Result<(), CoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CoreError::StoreUnavailable("memory store offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl LeaseStore for MemoryLeaseStore {
    const ENTITY: &'static str = "Resource";
    type Resource = MemoryResource;
    type Mutation = String;

    async fn try_acquire(
        &self,
        resource_id: DbId,
        holder_id: &str,
        now: Timestamp,
        expires_at: Timestamp,
    ) -> Result<Option<(MemoryResource, Lease)>, CoreError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.get_mut(&resource_id) else {
            return Ok(None);
        };
        let free = !row.lease.is_held_at(now) || row.lease.holder_id.as_deref() == Some(holder_id);
        if !free {
            return Ok(None);
        }
        row.lease.holder_id = Some(holder_id.to_string());
        row.lease.expires_at = Some(expires_at);
        let resource = MemoryResource {
            id: resource_id,
            title: row.title.clone(),
        };
        Ok(Some((resource, row.lease.clone())))
    }

    async fn try_release(&self, resource_id: DbId, holder_id: &str) -> Result<bool, CoreError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&resource_id) {
            Some(row) if row.lease.holder_id.as_deref() == Some(holder_id) => {
                row.lease = Lease::unlocked(resource_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn load_lease(&self, resource_id: DbId) -> Result<Option<Lease>, CoreError> {
        self.check()?;
        Ok(self.lease(resource_id))
    }

    async fn try_apply(
        &self,
        resource_id: DbId,
        holder_id: &str,
        now: Timestamp,
        require_lease: bool,
        mutation: &String,
    ) -> Result<Option<MemoryResource>, CoreError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.get_mut(&resource_id) else {
            return Ok(None);
        };
        let allowed = row.lease.is_held_by(holder_id, now)
            || (!require_lease && !row.lease.is_held_at(now));
        if !allowed {
            return Ok(None);
        }
        row.title = mutation.clone();
        Ok(Some(MemoryResource {
            id: resource_id,
            title: row.title.clone(),
        }))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryPresenceStore {
    beats: Arc<Mutex<HashMap<String, Timestamp>>>,
}

impl MemoryPresenceStore {
    pub fn last_heartbeat(&self, session_id: &str) -> Option<Timestamp> {
        self.beats.lock().unwrap().get(session_id).copied()
    }

    fn since(&self, cutoff: Timestamp) -> Vec<PresenceRecord> {
        let mut active: Vec<_> = self
            .beats
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, &at)| at >= cutoff)
            .map(|(session_id, &last_heartbeat)| PresenceRecord {
                session_id: session_id.clone(),
                last_heartbeat,
            })
            .collect();
        active.sort_by(|a, b| a.session_id.cmp(&b.session_id));
        active
    }
}

#[async_trait]
impl PresenceStore for MemoryPresenceStore {
    async fn upsert_heartbeat(
        &self,
        session_id: &str,
        at: Timestamp,
    ) -> Result<PresenceRecord, CoreError> {
        self.beats.lock().unwrap().insert(session_id.to_string(), at);
        Ok(PresenceRecord {
            session_id: session_id.to_string(),
            last_heartbeat: at,
        })
    }

    async fn active_since(&self, cutoff: Timestamp) -> Result<Vec<PresenceRecord>, CoreError> {
        Ok(self.since(cutoff))
    }

    async fn count_active_since(&self, cutoff: Timestamp) -> Result<i64, CoreError> {
        Ok(self.since(cutoff).len() as i64)
    }
}
