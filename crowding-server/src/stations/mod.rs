//! Station directory: bulk listing, disk cache, and fuzzy name
//! resolution.
//!
//! The directory is loaded once at startup (snapshot file, disk cache or
//! remote listing, in that order) and owned immutably for process
//! lifetime.

mod cache;
mod client;
mod directory;
mod error;
mod resolver;
mod score;

pub use cache::{DirectoryCache, DirectoryCacheConfig};
pub use client::{StopPointClient, StopPointClientConfig, StopPointDto};
pub use directory::{DirectoryLoader, StationDirectory, StationRecord};
pub use error::StationError;
pub use resolver::{DEFAULT_MIN_SCORE, ResolvedStation, StationResolver};
pub use score::weighted_ratio;
