//! Generic TTL cache for memoizing expensive per-key computations.
//!
//! Entries are whole-value replacements tagged with an expiry instant; an
//! expired entry is treated as absent on read and left in place. There is no
//! eviction policy beyond expiry-on-read.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};

struct CacheEntry<V> {
    value: V,
    expires_at: DateTime<Utc>,
}

/// Per-key store with explicit expiry, safe for concurrent `get`/`set`.
///
/// A single coarse lock serializes map access; values are cloned out so the
/// lock is never held across caller logic.
pub struct TtlCache<K, V> {
    entries: Mutex<HashMap<K, CacheEntry<V>>>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Store `value` under `key`, valid until `now + ttl`.
    ///
    /// Replaces any previous entry for the key wholesale.
    pub fn set(&self, key: K, value: V, ttl: Duration) {
        let expires_at = Utc::now() + ttl;
        self.lock().insert(key, CacheEntry { value, expires_at });
    }

    /// Fetch the value for `key`, or `None` if absent or expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let entries = self.lock();
        let entry = entries.get(key)?;
        if entry.expires_at <= Utc::now() {
            return None;
        }
        Some(entry.value.clone())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, CacheEntry<V>>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<K: Eq + Hash, V: Clone> Default for TtlCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
