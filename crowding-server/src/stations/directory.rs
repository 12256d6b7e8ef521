//! The canonical station directory and its loading chain.

use std::path::PathBuf;

use crate::domain::StationId;

use super::cache::DirectoryCache;
use super::client::{StopPointClient, StopPointDto};
use super::error::StationError;

/// One station in the directory.
#[derive(Debug, Clone)]
pub struct StationRecord {
    /// Display name, e.g. "South Kensington Underground Station".
    pub name: String,
    /// NaPTAN stop code.
    pub id: StationId,
}

/// Immutable directory of stations, built once at startup and owned for
/// process lifetime.
#[derive(Debug, Clone)]
pub struct StationDirectory {
    stations: Vec<StationRecord>,
}

impl StationDirectory {
    /// Build a directory from stop point DTOs.
    ///
    /// Stop points whose NaPTAN code doesn't parse are dropped.
    pub fn from_stop_points(stop_points: Vec<StopPointDto>) -> Self {
        let stations = stop_points
            .into_iter()
            .filter_map(|sp| {
                StationId::parse(&sp.naptan_id).ok().map(|id| StationRecord {
                    name: sp.common_name,
                    id,
                })
            })
            .collect();

        Self { stations }
    }

    /// All records, in listing order.
    pub fn records(&self) -> &[StationRecord] {
        &self.stations
    }

    /// Display names, sorted alphabetically (for the index page).
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.stations.iter().map(|s| s.name.clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

/// Loads the station directory from the first available source:
/// a static snapshot file, the fresh disk cache, the remote listing
/// (cached on success), or the stale disk cache as a last resort.
pub struct DirectoryLoader {
    snapshot_path: Option<PathBuf>,
    cache: DirectoryCache,
    client: StopPointClient,
}

impl DirectoryLoader {
    /// Create a new loader.
    pub fn new(
        snapshot_path: Option<PathBuf>,
        cache: DirectoryCache,
        client: StopPointClient,
    ) -> Self {
        Self {
            snapshot_path,
            cache,
            client,
        }
    }

    /// Load the directory.
    pub async fn load(&self) -> Result<StationDirectory, StationError> {
        if let Some(path) = &self.snapshot_path
            && path.exists()
        {
            let contents = std::fs::read_to_string(path).map_err(|e| StationError::Cache {
                message: format!("failed to read snapshot {}: {}", path.display(), e),
            })?;
            let stop_points = parse_snapshot(&contents)?;
            tracing::info!(path = %path.display(), count = stop_points.len(), "loaded station snapshot");
            return Ok(StationDirectory::from_stop_points(stop_points));
        }

        if let Some(stop_points) = self.cache.load_fresh() {
            tracing::info!(count = stop_points.len(), "loaded station listing from disk cache");
            return Ok(StationDirectory::from_stop_points(stop_points));
        }

        match self.client.fetch_tube_stations().await {
            Ok(stop_points) => {
                if let Err(e) = self.cache.save(&stop_points) {
                    tracing::warn!(error = %e, "failed to write station disk cache");
                }
                tracing::info!(count = stop_points.len(), "fetched station listing");
                Ok(StationDirectory::from_stop_points(stop_points))
            }
            Err(fetch_err) => match self.cache.load_stale() {
                Some(stop_points) => {
                    tracing::warn!(error = %fetch_err, "station listing fetch failed; using stale disk cache");
                    Ok(StationDirectory::from_stop_points(stop_points))
                }
                None => Err(StationError::Unavailable {
                    message: fetch_err.to_string(),
                }),
            },
        }
    }
}

/// Parse a station snapshot: either a bare array of stop points or the
/// raw API response with a `stopPoints` wrapper.
fn parse_snapshot(contents: &str) -> Result<Vec<StopPointDto>, StationError> {
    if let Ok(list) = serde_json::from_str::<Vec<StopPointDto>>(contents) {
        return Ok(list);
    }

    #[derive(serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Wrapper {
        stop_points: Vec<StopPointDto>,
    }

    serde_json::from_str::<Wrapper>(contents)
        .map(|w| w.stop_points)
        .map_err(|e| StationError::Json {
            message: e.to_string(),
        })
}
