use log::debug;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Spaces out API calls so that at most one request starts per `min_interval`
#[derive(Debug)]
pub struct RateLimiter {
    last_request_time: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            last_request_time: Mutex::new(None),
            min_interval,
        }
    }

    /// Wait if needed before making a request
    pub async fn wait_if_needed(&self) {
        if self.min_interval.is_zero() {
            return;
        }

        // Held across the sleep so concurrent callers queue up behind each other
        let mut last_time = self.last_request_time.lock().await;

        if let Some(last) = *last_time {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                debug!("Rate limiting: waiting {:?} before next TON API call", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last_time = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spaces_out_requests() {
        let limiter = RateLimiter::new(Duration::from_millis(50));
        let start = Instant::now();
        limiter.wait_if_needed().await;
        limiter.wait_if_needed().await;
        limiter.wait_if_needed().await;
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_zero_interval_never_waits() {
        let limiter = RateLimiter::new(Duration::ZERO);
        let start = Instant::now();
        for _ in 0..10 {
            limiter.wait_if_needed().await;
        }
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
