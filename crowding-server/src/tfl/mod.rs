//! TfL Unified API client.
//!
//! Provides the live crowding lookup plus the pacing primitive shared by
//! all outbound TfL calls. Key characteristics of the crowding endpoint:
//! - responses carry a `dataAvailable` flag; absence of data is a normal
//!   outcome, not an error
//! - the value is a percentage of the station's usual baseline (1.0 means
//!   "as busy as normal")
//! - the API throttles aggressively, hence the process-wide rate limiter

mod client;
mod error;
mod limiter;
mod types;

pub use client::{CrowdingClient, CrowdingClientConfig};
pub use error::TflError;
pub use limiter::RateLimiter;
pub use types::{CrowdingSample, LiveCrowdingDto};
