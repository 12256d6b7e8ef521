//! Read/write access to the per-station history files.

use std::path::{Path, PathBuf};

use crate::domain::{Direction, TimeBucket};

use super::types::{RouteRecord, StationHistory};

/// Errors from the route history store.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// The station/direction/time-bucket path does not exist in the
    /// dataset (or holds no routes). Fatal for the current render; no
    /// historical fallback is defined.
    #[error("no historical data for {station} {direction} at {bucket}")]
    DataUnavailable {
        station: String,
        direction: Direction,
        bucket: TimeBucket,
    },

    /// The station file exists but cannot be decoded.
    #[error("corrupt history file {path}: {message}")]
    Corrupt { path: PathBuf, message: String },

    /// A route's pivot index is outside its station sequence.
    #[error("route {route_idx} for {station} has pivot {pivot} out of bounds (len {len})")]
    PivotOutOfBounds {
        station: String,
        route_idx: usize,
        pivot: u32,
        len: usize,
    },

    /// Filesystem error other than the file simply not existing.
    #[error("failed to read history file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Reads historical route compositions from a directory of per-station
/// files.
#[derive(Debug, Clone)]
pub struct RouteHistoryStore {
    dir: PathBuf,
}

impl RouteHistoryStore {
    /// Create a store over the given dataset directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The dataset directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the history file for a station.
    pub fn file_path(&self, station: &str) -> PathBuf {
        self.dir.join(format!("{}.bin", sanitize_station_name(station)))
    }

    /// Read the routes for a station/direction/time-bucket.
    ///
    /// Routes come back in ascending route-index order. Missing file,
    /// missing path, or an empty route list is `DataUnavailable`; decode
    /// failures and bad pivots are distinct errors.
    pub fn routes_for(
        &self,
        station: &str,
        direction: Direction,
        bucket: TimeBucket,
    ) -> Result<Vec<RouteRecord>, HistoryError> {
        let path = self.file_path(station);

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(HistoryError::DataUnavailable {
                    station: station.to_string(),
                    direction,
                    bucket,
                });
            }
            Err(e) => return Err(HistoryError::Io { path, source: e }),
        };

        let history = StationHistory::decode(&bytes).map_err(|e| HistoryError::Corrupt {
            path,
            message: e.to_string(),
        })?;

        let routes = history
            .directions
            .get(direction.as_str())
            .and_then(|buckets| buckets.get(&bucket.key()))
            .map(|bucket| bucket.routes.clone())
            .unwrap_or_default();

        if routes.is_empty() {
            return Err(HistoryError::DataUnavailable {
                station: station.to_string(),
                direction,
                bucket,
            });
        }

        for (route_idx, route) in routes.iter().enumerate() {
            if route.upstream().is_none() {
                return Err(HistoryError::PivotOutOfBounds {
                    station: station.to_string(),
                    route_idx,
                    pivot: route.pivot_idx,
                    len: route.stations.len(),
                });
            }
        }

        Ok(routes)
    }

    /// Write a station's history file (dataset preparation and tests).
    ///
    /// Creates the dataset directory if needed.
    pub fn write(&self, station: &str, history: &StationHistory) -> Result<(), HistoryError> {
        if !self.dir.exists() {
            std::fs::create_dir_all(&self.dir).map_err(|e| HistoryError::Io {
                path: self.dir.clone(),
                source: e,
            })?;
        }

        let path = self.file_path(station);
        std::fs::write(&path, history.encode())
            .map_err(|e| HistoryError::Io { path, source: e })
    }
}

/// Collapse runs of non-alphanumeric characters to underscores, so
/// station display names make safe file names.
pub fn sanitize_station_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_sep = true;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            last_sep = false;
        } else if !last_sep {
            out.push('_');
            last_sep = true;
        }
    }

    while out.ends_with('_') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::NaiveTime;
    use tempfile::tempdir;

    use super::*;
    use crate::history::types::BucketHistory;

    fn bucket(h: u32, m: u32) -> TimeBucket {
        TimeBucket::from_time(NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    fn route(stations: &[&str], pivot: u32) -> RouteRecord {
        RouteRecord {
            stations: stations.iter().map(|s| s.to_string()).collect(),
            pivot_idx: pivot,
        }
    }

    fn history_with(direction: &str, key: &str, routes: Vec<RouteRecord>) -> StationHistory {
        let mut buckets = HashMap::new();
        buckets.insert(key.to_string(), BucketHistory { routes });
        let mut directions = HashMap::new();
        directions.insert(direction.to_string(), buckets);
        StationHistory { directions }
    }

    #[test]
    fn sanitize_names() {
        assert_eq!(sanitize_station_name("South Kensington"), "South_Kensington");
        assert_eq!(
            sanitize_station_name("King's Cross St. Pancras"),
            "King_s_Cross_St_Pancras"
        );
        assert_eq!(sanitize_station_name("  Oval  "), "Oval");
    }

    #[test]
    fn roundtrip_read_in_stored_order() {
        let dir = tempdir().unwrap();
        let store = RouteHistoryStore::new(dir.path());

        let routes = vec![
            route(&["Acton Town", "South Kensington"], 1),
            route(&["Heathrow", "Acton Town", "South Kensington"], 2),
        ];
        store
            .write(
                "South Kensington",
                &history_with("WB", "0930", routes.clone()),
            )
            .unwrap();

        let read = store
            .routes_for("South Kensington", Direction::Westbound, bucket(9, 35))
            .unwrap();
        assert_eq!(read, routes);
    }

    #[test]
    fn missing_station_is_data_unavailable() {
        let dir = tempdir().unwrap();
        let store = RouteHistoryStore::new(dir.path());

        let err = store
            .routes_for("Nowhere", Direction::Westbound, bucket(9, 30))
            .unwrap_err();
        assert!(matches!(err, HistoryError::DataUnavailable { .. }));
    }

    #[test]
    fn missing_direction_is_data_unavailable() {
        let dir = tempdir().unwrap();
        let store = RouteHistoryStore::new(dir.path());
        store
            .write("Oval", &history_with("NB", "0930", vec![route(&["A"], 0)]))
            .unwrap();

        let err = store
            .routes_for("Oval", Direction::Southbound, bucket(9, 30))
            .unwrap_err();
        assert!(matches!(err, HistoryError::DataUnavailable { .. }));
    }

    #[test]
    fn missing_bucket_is_data_unavailable() {
        let dir = tempdir().unwrap();
        let store = RouteHistoryStore::new(dir.path());
        store
            .write("Oval", &history_with("NB", "0930", vec![route(&["A"], 0)]))
            .unwrap();

        let err = store
            .routes_for("Oval", Direction::Northbound, bucket(17, 0))
            .unwrap_err();
        assert!(matches!(err, HistoryError::DataUnavailable { .. }));
    }

    #[test]
    fn empty_route_list_is_data_unavailable() {
        let dir = tempdir().unwrap();
        let store = RouteHistoryStore::new(dir.path());
        store
            .write("Oval", &history_with("NB", "0930", vec![]))
            .unwrap();

        let err = store
            .routes_for("Oval", Direction::Northbound, bucket(9, 30))
            .unwrap_err();
        assert!(matches!(err, HistoryError::DataUnavailable { .. }));
    }

    #[test]
    fn corrupt_file_is_distinguished() {
        let dir = tempdir().unwrap();
        let store = RouteHistoryStore::new(dir.path());
        std::fs::write(store.file_path("Oval"), b"garbage").unwrap();

        let err = store
            .routes_for("Oval", Direction::Northbound, bucket(9, 30))
            .unwrap_err();
        assert!(matches!(err, HistoryError::Corrupt { .. }));
    }

    #[test]
    fn bad_pivot_is_distinguished() {
        let dir = tempdir().unwrap();
        let store = RouteHistoryStore::new(dir.path());
        store
            .write("Oval", &history_with("NB", "0930", vec![route(&["A", "B"], 5)]))
            .unwrap();

        let err = store
            .routes_for("Oval", Direction::Northbound, bucket(9, 30))
            .unwrap_err();
        assert!(matches!(err, HistoryError::PivotOutOfBounds { pivot: 5, .. }));
    }

    #[test]
    fn bucket_rounding_selects_the_right_key() {
        let dir = tempdir().unwrap();
        let store = RouteHistoryStore::new(dir.path());
        store
            .write("Oval", &history_with("NB", "1000", vec![route(&["A"], 0)]))
            .unwrap();

        // 09:50 rounds to 10:00.
        assert!(
            store
                .routes_for("Oval", Direction::Northbound, bucket(9, 50))
                .is_ok()
        );
    }
}
