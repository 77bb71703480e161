//! Heartbeat-driven presence.
//!
//! A session is active while its last heartbeat falls inside a trailing
//! window. Heartbeats are blind upserts (last write wins), and nothing ever
//! deletes a presence record: stale sessions just stop matching the window.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::TimeDelta;
use serde::Serialize;

use crate::clock::Clock;
use crate::collaboration::{validate_presence_window, validate_session_id};
use crate::error::CoreError;
use crate::types::Timestamp;

/// One session's most recent liveness signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresenceRecord {
    pub session_id: String,
    pub last_heartbeat: Timestamp,
}

/// Store operations the presence tracker needs.
#[async_trait]
pub trait PresenceStore: Send + Sync {
    /// Unconditionally set `last_heartbeat = at` for `session_id`.
    async fn upsert_heartbeat(
        &self,
        session_id: &str,
        at: Timestamp,
    ) -> Result<PresenceRecord, CoreError>;

    /// Every record with `last_heartbeat >= cutoff`, ordered by session id.
    async fn active_since(&self, cutoff: Timestamp) -> Result<Vec<PresenceRecord>, CoreError>;

    /// Number of records with `last_heartbeat >= cutoff`.
    async fn count_active_since(&self, cutoff: Timestamp) -> Result<i64, CoreError>;
}

pub struct PresenceTracker<S> {
    store: S,
    clock: Arc<dyn Clock>,
}

impl<S: PresenceStore> PresenceTracker<S> {
    pub fn new(store: S, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Record that `session_id` is alive now. Surrounding whitespace is not
    /// part of the id, matching how lease holder ids are read from headers.
    pub async fn heartbeat(&self, session_id: &str) -> Result<PresenceRecord, CoreError> {
        let session_id = session_id.trim();
        validate_session_id(session_id).map_err(CoreError::Validation)?;
        self.store.upsert_heartbeat(session_id, self.clock.now()).await
    }

    /// Sessions whose last heartbeat is at most `window_secs` old. The
    /// boundary is inclusive.
    pub async fn list_active(&self, window_secs: i64) -> Result<Vec<PresenceRecord>, CoreError> {
        let cutoff = self.cutoff(window_secs)?;
        self.store.active_since(cutoff).await
    }

    pub async fn count_active(&self, window_secs: i64) -> Result<i64, CoreError> {
        let cutoff = self.cutoff(window_secs)?;
        self.store.count_active_since(cutoff).await
    }

    fn cutoff(&self, window_secs: i64) -> Result<Timestamp, CoreError> {
        validate_presence_window(window_secs).map_err(CoreError::Validation)?;
        Ok(self.clock.now() - TimeDelta::seconds(window_secs))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::DateTime;

    use super::*;
    use crate::clock::ManualClock;
    use crate::testing::MemoryPresenceStore;

    fn epoch() -> Timestamp {
        DateTime::from_timestamp(0, 0).unwrap()
    }

    fn setup() -> (
        PresenceTracker<MemoryPresenceStore>,
        Arc<ManualClock>,
        MemoryPresenceStore,
    ) {
        let store = MemoryPresenceStore::default();
        let clock = Arc::new(ManualClock::new(epoch()));
        (
            PresenceTracker::new(store.clone(), clock.clone()),
            clock,
            store,
        )
    }

    fn ids(records: &[PresenceRecord]) -> Vec<&str> {
        records.iter().map(|r| r.session_id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_session_falls_out_of_window() {
        let (tracker, clock, _) = setup();
        tracker.heartbeat("u1").await.unwrap();

        clock.set(epoch() + TimeDelta::seconds(10));
        assert_eq!(ids(&tracker.list_active(15).await.unwrap()), vec!["u1"]);

        clock.set(epoch() + TimeDelta::seconds(20));
        assert!(tracker.list_active(15).await.unwrap().is_empty());
        assert_eq!(ids(&tracker.list_active(25).await.unwrap()), vec!["u1"]);
    }

    #[tokio::test]
    async fn test_window_boundary_is_inclusive() {
        let (tracker, clock, _) = setup();
        tracker.heartbeat("u1").await.unwrap();

        clock.set(epoch() + TimeDelta::seconds(15));
        assert_eq!(ids(&tracker.list_active(15).await.unwrap()), vec!["u1"]);

        clock.advance_secs(1);
        assert!(tracker.list_active(15).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_active_is_monotonic_in_window() {
        let (tracker, clock, _) = setup();
        for (offset, session) in [(0, "a"), (5, "b"), (12, "c"), (30, "d")] {
            clock.set(epoch() + TimeDelta::seconds(offset));
            tracker.heartbeat(session).await.unwrap();
        }
        clock.set(epoch() + TimeDelta::seconds(40));

        let mut previous: Vec<String> = Vec::new();
        for window in [0, 5, 10, 28, 35, 40, 100] {
            let current: Vec<String> = tracker
                .list_active(window)
                .await
                .unwrap()
                .into_iter()
                .map(|r| r.session_id)
                .collect();
            assert!(
                previous.iter().all(|s| current.contains(s)),
                "window {window} dropped a session: {previous:?} -> {current:?}"
            );
            previous = current;
        }
        assert_eq!(previous, vec!["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn test_repeated_heartbeat_advances_timestamp() {
        let (tracker, clock, store) = setup();
        tracker.heartbeat("u1").await.unwrap();
        clock.advance_secs(7);
        let record = tracker.heartbeat("u1").await.unwrap();

        assert_eq!(record.last_heartbeat, epoch() + TimeDelta::seconds(7));
        assert_eq!(store.last_heartbeat("u1"), Some(record.last_heartbeat));
    }

    #[tokio::test]
    async fn test_late_heartbeat_moves_backwards() {
        let (tracker, clock, store) = setup();
        clock.set(epoch() + TimeDelta::seconds(50));
        tracker.heartbeat("u1").await.unwrap();

        clock.set(epoch() + TimeDelta::seconds(40));
        tracker.heartbeat("u1").await.unwrap();

        assert_eq!(
            store.last_heartbeat("u1"),
            Some(epoch() + TimeDelta::seconds(40))
        );
    }

    #[tokio::test]
    async fn test_empty_session_id_rejected() {
        let (tracker, _, store) = setup();
        assert_matches!(tracker.heartbeat("").await, Err(CoreError::Validation(_)));
        assert_eq!(store.last_heartbeat(""), None);
    }

    #[tokio::test]
    async fn test_padded_session_id_is_the_same_session() {
        let (tracker, clock, store) = setup();
        tracker.heartbeat("u1").await.unwrap();
        clock.advance_secs(3);
        let record = tracker.heartbeat("  u1 ").await.unwrap();

        assert_eq!(record.session_id, "u1");
        assert_eq!(store.last_heartbeat("u1"), Some(epoch() + TimeDelta::seconds(3)));
        assert_eq!(store.last_heartbeat("  u1 "), None);
        assert_eq!(ids(&tracker.list_active(15).await.unwrap()), vec!["u1"]);
    }

    #[tokio::test]
    async fn test_negative_window_rejected() {
        let (tracker, _, _) = setup();
        assert_matches!(tracker.list_active(-1).await, Err(CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn test_count_matches_list() {
        let (tracker, clock, _) = setup();
        tracker.heartbeat("a").await.unwrap();
        tracker.heartbeat("b").await.unwrap();
        clock.advance_secs(20);
        tracker.heartbeat("c").await.unwrap();

        assert_eq!(tracker.count_active(15).await.unwrap(), 1);
        assert_eq!(tracker.count_active(20).await.unwrap(), 3);
    }
}
