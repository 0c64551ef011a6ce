//! Topic-keyed response cache with TTL expiry.
//!
//! Keys are normalized topics (trimmed, lowercased), so `" Rust "` and `"rust"`
//! share an entry. Entries are replaced wholesale by `put`; an expired entry is
//! reported as a miss but stays in the map until it is overwritten or evicted
//! to make room under a capacity bound. The bound is strict: bounded inserts
//! are serialized, so concurrent puts never leave more than `capacity` entries.
//!
//! There is no single-flight: concurrent misses for the same topic each run the
//! pipeline and each `put`, last writer wins.

use dashmap::DashMap;
use std::sync::Mutex;
use tokio::time::{Duration, Instant};

/// Longest TTL honoured (about 30 years); larger values are clamped.
pub const MAX_TTL_SECONDS: i64 = 30 * 365 * 24 * 60 * 60;

struct CacheEntry<V> {
    payload: V,
    expires_at: Instant,
}

pub struct ResponseCache<V> {
    entries: DashMap<String, CacheEntry<V>>,
    capacity: Option<usize>,
    /// Serializes bounded inserts so the capacity check and the insert agree.
    insert_lock: Mutex<()>,
}

impl<V: Clone> ResponseCache<V> {
    /// Unbounded cache. Entries live until overwritten.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            capacity: None,
            insert_lock: Mutex::new(()),
        }
    }

    /// Cache holding at most `capacity` topics; 0 means unbounded.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            capacity: (capacity > 0).then_some(capacity),
            insert_lock: Mutex::new(()),
        }
    }

    /// Cache key for a topic.
    pub fn normalize_key(topic: &str) -> String {
        topic.trim().to_lowercase()
    }

    /// Payload for `topic` if it has not expired.
    pub fn get(&self, topic: &str) -> Option<V> {
        let key = Self::normalize_key(topic);
        let entry = self.entries.get(&key)?;
        if Instant::now() <= entry.expires_at {
            Some(entry.payload.clone())
        } else {
            None
        }
    }

    /// Store `payload` for `topic`, replacing any previous entry.
    ///
    /// `ttl_seconds` is clamped to `1..=MAX_TTL_SECONDS`.
    pub fn put(&self, topic: &str, payload: V, ttl_seconds: i64) {
        let key = Self::normalize_key(topic);
        let ttl = Duration::from_secs(ttl_seconds.clamp(1, MAX_TTL_SECONDS) as u64);
        let now = Instant::now();
        let entry = CacheEntry {
            payload,
            expires_at: now
                .checked_add(ttl)
                .unwrap_or_else(|| now + Duration::from_secs(MAX_TTL_SECONDS as u64)),
        };

        let Some(capacity) = self.capacity else {
            self.entries.insert(key, entry);
            return;
        };

        // a poisoned lock guards no data, so keep going
        let _guard = self
            .insert_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !self.entries.contains_key(&key) && self.entries.len() >= capacity {
            self.make_room(capacity);
        }
        self.entries.insert(key, entry);
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop expired entries, then the entry closest to expiry if still full.
    fn make_room(&self, capacity: usize) {
        let now = Instant::now();
        self.entries.retain(|_, entry| now <= entry.expires_at);

        if self.entries.len() < capacity {
            return;
        }

        let victim = self
            .entries
            .iter()
            .min_by_key(|entry| entry.expires_at)
            .map(|entry| entry.key().clone());

        if let Some(key) = victim {
            tracing::debug!(topic = %key, "Evicting cached digest to stay under capacity");
            self.entries.remove(&key);
        }
    }
}

impl<V: Clone> Default for ResponseCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
