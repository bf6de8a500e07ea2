//! # Progress Cache
//!
//! Injectable cache for computed progress, so callers can skip recomputation
//! for a short while.
//!
//! ## Design Principles
//!
//! - The engine never owns a cache; callers pass one to [`crate::ProgressTracker`].
//! - `BTreeMap` storage for deterministic ordering.
//! - Time is a logical clock advanced by the caller, not the wall clock.
//!   TTLs are expressed in the same ticks (e.g. seconds, if the caller
//!   advances once per second).

use std::collections::BTreeMap;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Default maximum cache size.
pub const DEFAULT_CACHE_SIZE: usize = 1000;

/// Default time-to-live, in ticks.
pub const DEFAULT_TTL: u64 = 300;

// =============================================================================
// CACHE INTERFACE
// =============================================================================

/// Minimal cache interface the session layer depends on.
pub trait ProgressCache<K, V> {
    /// Fetch a live entry. Expired entries are reported absent.
    fn get(&mut self, key: &K) -> Option<V>;

    /// Store an entry that expires `ttl` ticks from now.
    fn set(&mut self, key: K, value: V, ttl: u64);

    /// Drop an entry.
    fn invalidate(&mut self, key: &K);
}

// =============================================================================
// CACHE ENTRY
// =============================================================================

/// An entry in the TTL cache.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The cached value.
    pub value: T,

    /// Logical time after which the entry is stale.
    pub expires_at: u64,

    /// Logical timestamp of last access (for LRU ordering).
    pub last_access: u64,
}

impl<T> CacheEntry<T> {
    fn is_expired(&self, now: u64) -> bool {
        now > self.expires_at
    }
}

// =============================================================================
// TTL CACHE
// =============================================================================

/// In-memory TTL cache with least-recently-used eviction.
#[derive(Debug)]
pub struct TtlCache<K: Ord + Clone, V: Clone> {
    entries: BTreeMap<K, CacheEntry<V>>,
    max_size: usize,
    /// Caller-driven clock.
    now: u64,
    /// Tie-breaker for accesses within the same tick.
    access_counter: u64,
    hits: u64,
    misses: u64,
}

impl<K: Ord + Clone, V: Clone> Default for TtlCache<K, V> {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }
}

impl<K: Ord + Clone, V: Clone> TtlCache<K, V> {
    /// Create a cache holding at most `max_size` entries.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            max_size: max_size.max(1),
            now: 0,
            access_counter: 0,
            hits: 0,
            misses: 0,
        }
    }

    /// Move the clock forward.
    pub fn advance(&mut self, ticks: u64) {
        self.now = self.now.saturating_add(ticks);
    }

    /// Current logical time.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Read without touching statistics, recency or expiry.
    #[must_use]
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.entries
            .get(key)
            .filter(|e| !e.is_expired(self.now))
            .map(|e| &e.value)
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.now;
        let before = self.entries.len();
        self.entries.retain(|_, e| !e.is_expired(now));
        before - self.entries.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear the entire cache. Clock and statistics are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.entries.len(),
            max_size: self.max_size,
            hits: self.hits,
            misses: self.misses,
            hit_rate_percent: self.hit_rate_percent(),
        }
    }

    /// Hit rate as integer percentage (0-100).
    #[must_use]
    pub fn hit_rate_percent(&self) -> u8 {
        let total = self.hits.saturating_add(self.misses);
        if total == 0 {
            0
        } else {
            ((self.hits.saturating_mul(100)) / total) as u8
        }
    }

    fn next_access(&mut self) -> u64 {
        self.access_counter = self.access_counter.saturating_add(1);
        self.access_counter
    }

    /// Make room for one entry: expired entries first, then the least recently used.
    fn evict(&mut self) {
        if self.purge_expired() > 0 {
            return;
        }
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, e)| e.last_access)
            .map(|(k, _)| k.clone());
        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }
}

impl<K: Ord + Clone, V: Clone> ProgressCache<K, V> for TtlCache<K, V> {
    fn get(&mut self, key: &K) -> Option<V> {
        let now = self.now;
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => {
                self.misses = self.misses.saturating_add(1);
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.misses = self.misses.saturating_add(1);
            return None;
        }

        let access = self.next_access();
        self.hits = self.hits.saturating_add(1);
        self.entries.get_mut(key).map(|entry| {
            entry.last_access = access;
            entry.value.clone()
        })
    }

    fn set(&mut self, key: K, value: V, ttl: u64) {
        if self.entries.len() >= self.max_size && !self.entries.contains_key(&key) {
            self.evict();
        }
        let access = self.next_access();
        let entry = CacheEntry {
            value,
            expires_at: self.now.saturating_add(ttl),
            last_access: access,
        };
        self.entries.insert(key, entry);
    }

    fn invalidate(&mut self, key: &K) {
        self.entries.remove(key);
    }
}

// =============================================================================
// CACHE STATISTICS
// =============================================================================

/// Statistics about cache performance.
#[derive(Debug, Clone, Copy)]
pub struct CacheStats {
    /// Current number of entries.
    pub size: usize,

    /// Maximum cache size.
    pub max_size: usize,

    /// Total cache hits.
    pub hits: u64,

    /// Total cache misses (expired reads included).
    pub misses: u64,

    /// Hit rate as integer percentage (0-100).
    pub hit_rate_percent: u8,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_set_and_get() {
        let mut cache = TtlCache::new(10);
        cache.set(1u64, "value1", 10);
        cache.set(2u64, "value2", 10);

        assert_eq!(cache.get(&1), Some("value1"));
        assert_eq!(cache.get(&2), Some("value2"));
        assert_eq!(cache.get(&3), None);
    }

    #[test]
    fn entry_lives_through_its_ttl() {
        let mut cache = TtlCache::new(10);
        cache.set("user", 7, 5);

        cache.advance(5);
        assert_eq!(cache.get(&"user"), Some(7));

        cache.advance(1);
        assert_eq!(cache.get(&"user"), None);
        assert!(cache.is_empty(), "expired entry is dropped on read");
    }

    #[test]
    fn peek_hides_expired_without_removing() {
        let mut cache = TtlCache::new(10);
        cache.set(1u64, "a", 0);
        assert_eq!(cache.peek(&1), Some(&"a"));
        cache.advance(1);
        assert_eq!(cache.peek(&1), None);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.purge_expired(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn cache_eviction_prefers_lru() {
        let mut cache = TtlCache::new(3);
        cache.set(1u64, "a", 100);
        cache.set(2u64, "b", 100);
        cache.set(3u64, "c", 100);

        // Access 1 and 2 to make 3 the LRU
        let _ = cache.get(&1);
        let _ = cache.get(&2);

        cache.set(4u64, "d", 100);

        assert!(cache.peek(&1).is_some());
        assert!(cache.peek(&2).is_some());
        assert!(cache.peek(&3).is_none());
        assert!(cache.peek(&4).is_some());
    }

    #[test]
    fn cache_eviction_prefers_expired() {
        let mut cache = TtlCache::new(2);
        cache.set(1u64, "short", 1);
        cache.set(2u64, "long", 100);
        let _ = cache.get(&1);
        cache.advance(2);

        cache.set(3u64, "new", 100);
        assert_eq!(cache.len(), 2);
        assert!(cache.peek(&2).is_some());
        assert!(cache.peek(&3).is_some());
    }

    #[test]
    fn cache_stats() {
        let mut cache = TtlCache::<u64, &str>::new(10);

        cache.set(1, "a", 10);
        let _ = cache.get(&1); // Hit
        let _ = cache.get(&2); // Miss
        let _ = cache.get(&1); // Hit
        let _ = cache.get(&3); // Miss

        let stats = cache.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.hit_rate_percent, 50);
    }

    #[test]
    fn overwrite_refreshes_ttl() {
        let mut cache = TtlCache::new(10);
        cache.set(1u64, "old", 1);
        cache.advance(1);
        cache.set(1u64, "new", 5);
        cache.advance(3);
        assert_eq!(cache.get(&1), Some("new"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn invalidate_and_clear() {
        let mut cache = TtlCache::new(10);
        cache.set(1u64, "a", 10);
        cache.set(2u64, "b", 10);

        cache.invalidate(&1);
        assert_eq!(cache.get(&1), None);

        cache.clear();
        assert!(cache.is_empty());
    }
}
