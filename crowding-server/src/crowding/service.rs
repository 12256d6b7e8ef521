//! Cached, rate-limited access to live crowding data.

use tokio::sync::Mutex;

use crate::domain::StationId;
use crate::stations::StationResolver;
use crate::tfl::{CrowdingClient, CrowdingSample, RateLimiter};

use super::cache::{CrowdingCacheConfig, JitteredCache};

/// The one entry point for live crowding lookups.
///
/// Wraps the TfL client with the process-wide rate limiter and the
/// jittered TTL cache. `get_or_fetch` is infallible by design: a fetch
/// failure becomes an [`CrowdingSample::Unavailable`] sample, and that
/// sentinel is cached for a full jittered TTL just like a success. This
/// damps retry storms against a failing upstream, at the cost of serving
/// the sentinel for up to `base_ttl + jitter` after a transient failure
/// recovers.
pub struct CrowdingService {
    client: CrowdingClient,
    limiter: RateLimiter,
    cache: Mutex<JitteredCache>,
}

impl CrowdingService {
    /// Create a new service over the given client, limiter and cache config.
    pub fn new(client: CrowdingClient, limiter: RateLimiter, cache: CrowdingCacheConfig) -> Self {
        Self {
            client,
            limiter,
            cache: Mutex::new(JitteredCache::new(cache)),
        }
    }

    /// Get the crowding sample for a station, fetching on miss or expiry.
    pub async fn get_or_fetch(&self, station: &StationId) -> CrowdingSample {
        if let Some(hit) = self.cache.lock().await.get(station) {
            return hit;
        }

        // The lock is not held across the fetch; two callers racing on the
        // same expired key may both fetch, which is harmless.
        let sample = match self.limiter.run(self.client.live_crowding(station)).await {
            Ok(sample) => sample,
            Err(e) => {
                tracing::warn!(station = %station, error = %e, "live crowding fetch failed");
                CrowdingSample::Unavailable
            }
        };

        self.cache.lock().await.insert(station.clone(), sample);
        sample
    }

    /// Live crowding weight for a free-text station name.
    ///
    /// Resolution failure and unavailable data both fall back to the
    /// neutral weight `1.0`; live-data trouble must never fail a render.
    pub async fn weight_for_name(&self, resolver: &StationResolver, name: &str) -> f64 {
        match resolver.resolve(name) {
            Some(resolved) => self.get_or_fetch(&resolved.id).await.weight(),
            None => {
                tracing::warn!(name, "no station match; using neutral crowding weight");
                1.0
            }
        }
    }

    /// Number of cached samples (expired entries included until touched).
    pub async fn cache_len(&self) -> usize {
        self.cache.lock().await.len()
    }
}
