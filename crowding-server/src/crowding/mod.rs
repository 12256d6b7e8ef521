//! Live crowding acquisition: jittered TTL cache over the rate-limited
//! TfL fetch.

mod cache;
mod service;

pub use cache::{CrowdingCacheConfig, JitteredCache};
pub use service::CrowdingService;
