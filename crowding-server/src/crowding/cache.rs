//! Jittered TTL cache for live crowding samples.
//!
//! An explicit key → (value, expiry) map rather than an off-the-shelf TTL
//! cache: every entry gets its own expiry, randomized within a window
//! around the base TTL so that entries written together do not all expire
//! together and trigger a synchronized miss spike.

use std::collections::HashMap;
use std::time::Duration;

use rand::Rng;
use tokio::time::Instant;

use crate::domain::StationId;
use crate::tfl::CrowdingSample;

/// Configuration for the crowding cache.
#[derive(Debug, Clone)]
pub struct CrowdingCacheConfig {
    /// Base time-to-live for entries.
    pub base_ttl: Duration,

    /// Half-width of the jitter window. Each entry's actual TTL is
    /// `base_ttl + uniform(-jitter, +jitter)`.
    pub jitter: Duration,

    /// Maximum number of entries.
    pub max_capacity: usize,
}

impl Default for CrowdingCacheConfig {
    fn default() -> Self {
        Self {
            base_ttl: Duration::from_secs(900),
            jitter: Duration::from_secs(60),
            max_capacity: 1024,
        }
    }
}

/// A cached sample with its absolute expiry time.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: CrowdingSample,
    expiry: Instant,
}

/// Bounded map of station → crowding sample with per-entry jittered expiry.
///
/// Expiry is checked lazily on read: an expired entry is evicted by the
/// access that discovers it. Capacity pressure is handled on write by
/// dropping expired entries first, then the entry closest to expiring.
#[derive(Debug)]
pub struct JitteredCache {
    entries: HashMap<StationId, CacheEntry>,
    config: CrowdingCacheConfig,
}

impl JitteredCache {
    /// Create an empty cache with the given configuration.
    pub fn new(config: CrowdingCacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            config,
        }
    }

    /// Look up a station's cached sample.
    ///
    /// Returns `None` on miss or expiry; an expired entry is removed.
    pub fn get(&mut self, key: &StationId) -> Option<CrowdingSample> {
        let now = Instant::now();

        match self.entries.get(key) {
            Some(entry) if now < entry.expiry => Some(entry.value),
            Some(_) => {
                self.entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Insert a sample under a freshly jittered expiry.
    pub fn insert(&mut self, key: StationId, value: CrowdingSample) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.config.max_capacity {
            self.evict();
        }

        let expiry = Instant::now() + self.jittered_ttl();
        self.entries.insert(key, CacheEntry { value, expiry });
    }

    /// The recorded expiry for a key, if present (ignores whether it has
    /// passed). Exposed for monitoring and tests.
    pub fn expiry_of(&self, key: &StationId) -> Option<Instant> {
        self.entries.get(key).map(|e| e.expiry)
    }

    /// Number of entries currently held, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop expired entries; if none were expired, drop the entry with the
    /// earliest expiry to make room.
    fn evict(&mut self) {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, e| now < e.expiry);

        if self.entries.len() == before {
            if let Some(oldest) = self
                .entries
                .iter()
                .min_by_key(|(_, e)| e.expiry)
                .map(|(k, _)| k.clone())
            {
                self.entries.remove(&oldest);
            }
        }
    }

    fn jittered_ttl(&self) -> Duration {
        let jitter_ms = self.config.jitter.as_millis() as i64;
        let offset_ms = if jitter_ms == 0 {
            0
        } else {
            rand::thread_rng().gen_range(-jitter_ms..=jitter_ms)
        };

        let base_ms = self.config.base_ttl.as_millis() as i64;
        Duration::from_millis((base_ms + offset_ms).max(0) as u64)
    }
}
