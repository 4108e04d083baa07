use crate::domain::errors::{DomainError, DomainResult};
use crate::ports::IdempotencyStorePort;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyPhase {
    InFlight,
    Completed,
}

#[derive(Debug, Clone, Copy)]
struct KeyEntry {
    phase: KeyPhase,
    touched_at: Instant,
}

/// Process-wide in-memory idempotency store. Lives for the lifetime of the
/// process, shared across every checkout session; not durable across
/// restarts. Completed keys are evicted lazily once older than the TTL.
pub struct InMemoryIdempotencyStore {
    entries: DashMap<String, KeyEntry>,
    completed_ttl: Duration,
}

impl Default for InMemoryIdempotencyStore {
    fn default() -> Self {
        Self::new(Duration::from_secs(24 * 60 * 60))
    }
}

impl InMemoryIdempotencyStore {
    pub fn new(completed_ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            completed_ttl,
        }
    }

    fn evict_stale(&self) {
        let ttl = self.completed_ttl;
        self.entries
            .retain(|_, entry| entry.phase != KeyPhase::Completed || entry.touched_at.elapsed() <= ttl);
    }
}

impl IdempotencyStorePort for InMemoryIdempotencyStore {
    fn begin(&self, key: &str) -> DomainResult<()> {
        self.evict_stale();

        match self.entries.entry(key.to_string()) {
            Entry::Occupied(_) => Err(DomainError::DuplicatePayment(key.to_string())),
            Entry::Vacant(vacant) => {
                vacant.insert(KeyEntry {
                    phase: KeyPhase::InFlight,
                    touched_at: Instant::now(),
                });
                debug!("Idempotency key claimed: {}", key);
                Ok(())
            }
        }
    }

    fn commit(&self, key: &str) {
        self.entries.insert(
            key.to_string(),
            KeyEntry {
                phase: KeyPhase::Completed,
                touched_at: Instant::now(),
            },
        );
        debug!("Idempotency key completed: {}", key);
    }

    fn release(&self, key: &str) {
        // Completed markers survive; only in-flight claims are dropped.
        self.entries
            .remove_if(key, |_, entry| entry.phase == KeyPhase::InFlight);
    }

    fn is_completed(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .map(|entry| entry.phase == KeyPhase::Completed)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_rejects_in_flight_key() {
        let store = InMemoryIdempotencyStore::default();
        store.begin("pay-1").unwrap();
        assert!(store.begin("pay-1").is_err());
    }

    #[test]
    fn test_release_frees_in_flight_key() {
        let store = InMemoryIdempotencyStore::default();
        store.begin("pay-1").unwrap();
        store.release("pay-1");
        assert!(store.begin("pay-1").is_ok());
    }

    #[test]
    fn test_completed_key_survives_release() {
        let store = InMemoryIdempotencyStore::default();
        store.begin("pay-1").unwrap();
        store.commit("pay-1");
        store.release("pay-1");

        assert!(store.is_completed("pay-1"));
        assert!(store.begin("pay-1").is_err());
    }

    #[test]
    fn test_completed_key_evicts_after_ttl() {
        let store = InMemoryIdempotencyStore::new(Duration::from_millis(5));
        store.begin("pay-1").unwrap();
        store.commit("pay-1");

        std::thread::sleep(Duration::from_millis(10));

        assert!(store.begin("pay-1").is_ok());
    }

    #[test]
    fn test_in_flight_key_is_not_evicted() {
        let store = InMemoryIdempotencyStore::new(Duration::from_millis(5));
        store.begin("pay-1").unwrap();

        std::thread::sleep(Duration::from_millis(10));

        assert!(store.begin("pay-1").is_err());
        assert!(!store.is_completed("pay-1"));
    }

    #[test]
    fn test_independent_keys() {
        let store = InMemoryIdempotencyStore::default();
        store.begin("pay-1").unwrap();
        assert!(store.begin("pay-2").is_ok());
    }
}
