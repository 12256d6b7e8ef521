//! Core domain types: station identifiers, directions, time buckets.

mod direction;
mod station;
mod time;

pub use direction::{Direction, InvalidDirection};
pub use station::{InvalidStationId, StationId, TUBE_PREFIX};
pub use time::TimeBucket;
