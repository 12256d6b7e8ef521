//! Disk-based cache for the station listing.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::client::StopPointDto;
use super::error::StationError;

/// Default cache TTL: 24 hours.
const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Default jitter half-width: 1 hour.
const DEFAULT_JITTER: Duration = Duration::from_secs(60 * 60);

/// Cached station listing with its expiry, decided at write time.
#[derive(Debug, Serialize, Deserialize)]
struct CachedStations {
    /// Unix timestamp after which the cache is stale.
    expires_at_secs: u64,
    /// The cached stop points.
    stations: Vec<StopPointDto>,
}

/// Configuration for the station disk cache.
#[derive(Debug, Clone)]
pub struct DirectoryCacheConfig {
    /// Path to the cache file.
    pub path: PathBuf,
    /// Base TTL.
    pub ttl: Duration,
    /// Jitter half-width applied to the TTL at write time.
    pub jitter: Duration,
}

impl DirectoryCacheConfig {
    /// Create a new cache config with the given path and default TTL.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: DEFAULT_TTL,
            jitter: DEFAULT_JITTER,
        }
    }

    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set a custom jitter half-width.
    pub fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = jitter;
        self
    }
}

/// Disk cache for the station listing.
///
/// `load_fresh` respects the recorded expiry; `load_stale` ignores it and
/// serves as the on-disk fallback when the remote listing is unreachable.
#[derive(Debug, Clone)]
pub struct DirectoryCache {
    config: DirectoryCacheConfig,
}

impl DirectoryCache {
    /// Create a new directory cache with the given config.
    pub fn new(config: DirectoryCacheConfig) -> Self {
        Self { config }
    }

    /// Load stations if the cache exists, parses, and has not expired.
    pub fn load_fresh(&self) -> Option<Vec<StopPointDto>> {
        let cached = self.read()?;
        if unix_now()? >= cached.expires_at_secs {
            return None;
        }
        Some(cached.stations)
    }

    /// Load stations regardless of expiry.
    pub fn load_stale(&self) -> Option<Vec<StopPointDto>> {
        Some(self.read()?.stations)
    }

    /// Save stations under a freshly jittered expiry.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, stations: &[StopPointDto]) -> Result<(), StationError> {
        let now = unix_now().ok_or_else(|| StationError::Cache {
            message: "system time before unix epoch".to_string(),
        })?;

        let jitter_secs = self.config.jitter.as_secs() as i64;
        let offset = if jitter_secs == 0 {
            0
        } else {
            rand::thread_rng().gen_range(-jitter_secs..=jitter_secs)
        };
        let ttl = (self.config.ttl.as_secs() as i64 + offset).max(0) as u64;

        let cached = CachedStations {
            expires_at_secs: now + ttl,
            stations: stations.to_vec(),
        };

        if let Some(parent) = self.config.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| StationError::Cache {
                message: format!("failed to create cache directory: {}", e),
            })?;
        }

        let json = serde_json::to_string_pretty(&cached).map_err(|e| StationError::Cache {
            message: format!("failed to serialize cache: {}", e),
        })?;

        std::fs::write(&self.config.path, json).map_err(|e| StationError::Cache {
            message: format!("failed to write cache file: {}", e),
        })?;

        Ok(())
    }

    /// Get the cache file path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    fn read(&self) -> Option<CachedStations> {
        let contents = std::fs::read_to_string(&self.config.path).ok()?;
        serde_json::from_str(&contents).ok()
    }
}

fn unix_now() -> Option<u64> {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs())
}
