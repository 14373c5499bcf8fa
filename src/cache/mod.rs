//! Bounded, time-expiring result cache
//!
//! LRU eviction plus per-entry TTL. Expiry is lazy: a stale entry is
//! removed by the `get` that observes it, there is no background sweep.
//! All operations serialize under a single mutex per cache instance, so
//! a cache can be shared freely across threads.
//!
//! Callers memoize with an explicit cache-aside sequence (check, compute
//! on miss, store) and derive keys with [`memo_key`] so that identical
//! inputs always map to the same entry.

use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::config::CacheConfig;

struct CacheEntry<T> {
    value: T,
    inserted_at: Instant,
    /// Recency tick; the smallest tick is the least-recently-used entry
    last_used: u64,
}

struct CacheState<T> {
    entries: HashMap<String, CacheEntry<T>>,
    tick: u64,
    hits: u64,
    misses: u64,
}

/// Hit/miss counters for one cache instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    /// Fraction of lookups that hit, in [0, 1]. Zero lookups reports 0.
    pub fn hit_rate(&self) -> f32 {
        let total = self.hits + self.misses;
        if total == 0 {
            return 0.0;
        }
        self.hits as f32 / total as f32
    }
}

/// Capacity-bounded LRU cache with per-entry TTL.
pub struct ResultCache<T> {
    inner: Mutex<CacheState<T>>,
    capacity: usize,
    ttl: Duration,
}

impl<T: Clone> ResultCache<T> {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            inner: Mutex::new(CacheState {
                entries: HashMap::new(),
                tick: 0,
                hits: 0,
                misses: 0,
            }),
            // A zero-capacity cache could never hold the entry it just inserted
            capacity: config.capacity.max(1),
            ttl: config.ttl,
        }
    }

    /// Look up a key. Missing or expired entries are misses; an expired
    /// entry is removed on the spot.
    pub fn get(&self, key: &str) -> Option<T> {
        let mut state = self.inner.lock();

        let fresh = match state.entries.get(key) {
            Some(entry) => entry.inserted_at.elapsed() <= self.ttl,
            None => {
                state.misses += 1;
                return None;
            }
        };

        if !fresh {
            state.entries.remove(key);
            state.misses += 1;
            return None;
        }

        state.tick += 1;
        state.hits += 1;
        let tick = state.tick;
        let entry = state.entries.get_mut(key)?;
        entry.last_used = tick;
        Some(entry.value.clone())
    }

    /// Insert or replace. Inserting a new key at capacity evicts the
    /// least-recently-used entry first.
    pub fn put(&self, key: String, value: T) {
        let mut state = self.inner.lock();
        state.tick += 1;
        let tick = state.tick;

        if !state.entries.contains_key(&key) && state.entries.len() >= self.capacity {
            let oldest = state
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                state.entries.remove(&oldest);
            }
        }

        state.entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
                last_used: tick,
            },
        );
    }

    /// Drop every entry. Counters are kept - clearing is not a lookup.
    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }

    /// Live entry count. Entries past their TTL still count until a `get`
    /// observes them.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.inner.lock();
        CacheStats {
            hits: state.hits,
            misses: state.misses,
        }
    }
}

/// Derive a deterministic cache key from an operation name and its
/// identifying inputs. Parts are length-delimited before hashing so that
/// `["ab", "c"]` and `["a", "bc"]` cannot collide.
pub fn memo_key(op: &str, parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(op.as_bytes());
    for part in parts {
        hasher.update((part.len() as u64).to_le_bytes());
        hasher.update(part.as_bytes());
    }
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}
