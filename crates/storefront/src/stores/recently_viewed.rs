//! Recently viewed products: a small most-recent-first ring.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::persist::Persistence;
use crate::stores::keys;

/// Maximum entries kept; older views fall off the end.
const MAX_ENTRIES: usize = 12;

/// One product view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentlyViewedEntry {
    /// Product ID - deduplication key.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// When the product was last viewed.
    pub viewed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PersistedRing {
    entries: Vec<RecentlyViewedEntry>,
}

/// Shared, persisted recently-viewed ring.
pub struct RecentlyViewedStore {
    persistence: Arc<dyn Persistence>,
    state: Mutex<PersistedRing>,
}

impl RecentlyViewedStore {
    /// Load the ring from persistence. An unreadable snapshot loads empty.
    pub fn load(persistence: Arc<dyn Persistence>) -> Self {
        let state = match persistence.load(keys::RECENTLY_VIEWED) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_default(),
            Ok(None) => PersistedRing::default(),
            Err(e) => {
                warn!(error = %e, "Failed to load recently viewed");
                PersistedRing::default()
            }
        };

        Self {
            persistence,
            state: Mutex::new(state),
        }
    }

    /// Record a product view.
    ///
    /// Re-viewing a product moves its entry to the front with a fresh
    /// timestamp rather than duplicating it; the ring never exceeds twelve
    /// entries.
    pub fn record(&self, id: &str, handle: &str) {
        let mut state = self.lock();
        state.entries.retain(|e| e.id != id);
        state.entries.insert(
            0,
            RecentlyViewedEntry {
                id: id.to_string(),
                handle: handle.to_string(),
                viewed_at: Utc::now(),
            },
        );
        state.entries.truncate(MAX_ENTRIES);
        self.persist(&state);
    }

    /// Snapshot, most-recent-first.
    #[must_use]
    pub fn entries(&self) -> Vec<RecentlyViewedEntry> {
        self.lock().entries.clone()
    }

    fn persist(&self, state: &PersistedRing) {
        match serde_json::to_string(state) {
            Ok(json) => {
                if let Err(e) = self.persistence.save(keys::RECENTLY_VIEWED, &json) {
                    warn!(error = %e, "Failed to persist recently viewed");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize recently viewed"),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PersistedRing> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::persist::MemoryPersistence;

    use super::*;

    fn empty_store() -> (Arc<MemoryPersistence>, RecentlyViewedStore) {
        let persistence = Arc::new(MemoryPersistence::new());
        let store = RecentlyViewedStore::load(persistence.clone());
        (persistence, store)
    }

    #[test]
    fn test_cap_at_twelve_most_recent_first() {
        let (_, store) = empty_store();
        for i in 0..13 {
            store.record(&format!("p{i}"), &format!("handle-{i}"));
        }

        let entries = store.entries();
        assert_eq!(entries.len(), 12);
        assert_eq!(entries[0].id, "p12");
        // The oldest view fell off
        assert!(!entries.iter().any(|e| e.id == "p0"));
    }

    #[test]
    fn test_reviewing_moves_to_front_without_duplicating() {
        let (_, store) = empty_store();
        store.record("p1", "one");
        store.record("p2", "two");
        store.record("p1", "one");

        let entries = store.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "p1");
        assert_eq!(entries[1].id, "p2");
    }

    #[test]
    fn test_reload_preserves_ring() {
        let (persistence, store) = empty_store();
        store.record("p1", "one");
        drop(store);

        let reloaded = RecentlyViewedStore::load(persistence);
        assert_eq!(reloaded.entries().len(), 1);
        assert_eq!(reloaded.entries()[0].handle, "one");
    }
}
