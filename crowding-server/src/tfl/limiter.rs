//! Minimum-interval pacing for outbound TfL calls.

use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Paces outbound calls so that consecutive calls are at least a minimum
/// interval apart, measured from the previous call's completion.
///
/// The last-completion timestamp lives behind a mutex and the lock is held
/// across the wrapped call, so concurrent callers queue up rather than
/// racing through the spacing check.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a limiter with the given minimum interval between calls.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    /// The configured minimum interval.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Run `call` after waiting out any remaining interval, recording the
    /// completion time afterwards.
    pub async fn run<T, F>(&self, call: F) -> T
    where
        F: Future<Output = T>,
    {
        let mut last = self.last_call.lock().await;

        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }

        let result = call.await;
        *last = Some(Instant::now());
        result
    }
}
