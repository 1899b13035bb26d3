//! Request pacing and 429 backoff for the blocking HTTP client.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Upper bound for a single backoff wait.
pub const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Enforces a minimum interval between consecutive requests.
#[derive(Debug)]
pub struct Throttle {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Block until the next request may be sent, then mark it as sent.
    pub fn wait(&self) {
        let mut last = match self.last_request.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                std::thread::sleep(self.min_interval - elapsed);
            }
        }

        *last = Some(Instant::now());
    }
}

/// Delay before retry number `attempt` (1-based).
///
/// A `Retry-After` value from the server wins; otherwise the delay doubles
/// from `base` on every attempt. Both are capped at `MAX_BACKOFF`.
pub fn backoff_delay(attempt: u32, base: Duration, retry_after: Option<u64>) -> Duration {
    let delay = match retry_after {
        Some(secs) => Duration::from_secs(secs),
        None => {
            let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
            base.saturating_mul(factor)
        }
    };
    delay.min(MAX_BACKOFF)
}

/// Parse a `Retry-After` header given in whole seconds.
pub fn parse_retry_after(value: Option<&str>) -> Option<u64> {
    value.and_then(|v| v.trim().parse::<u64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles() {
        let base = Duration::from_millis(500);
        assert_eq!(backoff_delay(1, base, None), Duration::from_millis(500));
        assert_eq!(backoff_delay(2, base, None), Duration::from_millis(1000));
        assert_eq!(backoff_delay(3, base, None), Duration::from_millis(2000));
    }

    #[test]
    fn test_backoff_capped() {
        let base = Duration::from_millis(500);
        assert_eq!(backoff_delay(20, base, None), MAX_BACKOFF);
        assert_eq!(backoff_delay(1, base, Some(600)), MAX_BACKOFF);
    }

    #[test]
    fn test_retry_after_wins() {
        let base = Duration::from_millis(500);
        assert_eq!(backoff_delay(3, base, Some(2)), Duration::from_secs(2));
        assert_eq!(backoff_delay(1, base, Some(0)), Duration::ZERO);
    }

    #[test]
    fn test_parse_retry_after() {
        assert_eq!(parse_retry_after(Some("10")), Some(10));
        assert_eq!(parse_retry_after(Some(" 3 ")), Some(3));
        assert_eq!(parse_retry_after(Some("Wed, 21 Oct 2015 07:28:00 GMT")), None);
        assert_eq!(parse_retry_after(None), None);
    }

    #[test]
    fn test_throttle_spaces_requests() {
        let throttle = Throttle::new(Duration::from_millis(30));
        let start = Instant::now();
        throttle.wait();
        throttle.wait();
        throttle.wait();
        assert!(start.elapsed() >= Duration::from_millis(60));
    }

    #[test]
    fn test_zero_interval_never_sleeps() {
        let throttle = Throttle::new(Duration::ZERO);
        let start = Instant::now();
        for _ in 0..100 {
            throttle.wait();
        }
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
