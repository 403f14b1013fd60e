use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use uuid::Uuid;

/// Server-side double-submission gate.
///
/// Each checkout form mints a `draft_id`; a draft that was accepted keeps its
/// slot until the TTL runs out, so a second click (or an impatient retry of a
/// request that actually succeeded) is refused instead of creating a second
/// order. A failed submission releases the slot immediately so the customer
/// can retry.
pub struct SubmissionGuard {
    ttl: Duration,
    inflight: Mutex<HashMap<Uuid, Instant>>,
}

impl SubmissionGuard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// Claims the draft. Returns `false` when the draft already holds a live
    /// slot. Expired slots are reaped lazily on each call.
    pub fn try_acquire(&self, draft_id: Uuid) -> bool {
        let now = Instant::now();
        let mut inflight = self.lock();
        inflight.retain(|_, started| now.duration_since(*started) < self.ttl);
        match inflight.entry(draft_id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(now);
                true
            }
        }
    }

    /// Frees the slot early, used when the submission failed.
    pub fn release(&self, draft_id: Uuid) {
        self.lock().remove(&draft_id);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, Instant>> {
        // A poisoned lock still holds a usable map.
        self.inflight.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_draft_is_refused() {
        let guard = SubmissionGuard::new(Duration::from_secs(30));
        let draft = Uuid::new_v4();

        assert!(guard.try_acquire(draft));
        assert!(!guard.try_acquire(draft));

        // Other drafts are unaffected.
        assert!(guard.try_acquire(Uuid::new_v4()));
    }

    #[test]
    fn test_release_frees_the_slot() {
        let guard = SubmissionGuard::new(Duration::from_secs(30));
        let draft = Uuid::new_v4();

        assert!(guard.try_acquire(draft));
        guard.release(draft);
        assert!(guard.try_acquire(draft));
    }

    #[test]
    fn test_expired_slots_are_reaped() {
        let guard = SubmissionGuard::new(Duration::from_millis(10));
        let draft = Uuid::new_v4();

        assert!(guard.try_acquire(draft));
        std::thread::sleep(Duration::from_millis(25));
        assert!(guard.try_acquire(draft));
    }
}
