//! Historical route-composition dataset.
//!
//! For each station the dataset records, per direction and half-hour time
//! bucket, the set of routes that pass through it: ordered station
//! sequences with a pivot marking the query station's position.

mod store;
mod types;

pub use store::{HistoryError, RouteHistoryStore, sanitize_station_name};
pub use types::{BucketHistory, RouteRecord, StationHistory};
