use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Spaces requests out to stay under the API's throttling threshold.
///
/// Sleeps only for whatever remains of the minimum interval since the last
/// request, so cache hits between fetches do not stack up idle time.
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Option<Instant>,
}

impl RateLimiter {
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval: Duration::from_millis(min_interval_ms),
            last_request: None,
        }
    }

    pub async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
        self.last_request = Some(Instant::now());
    }

    pub fn reset(&mut self) {
        self.last_request = None;
    }
}
