//! Per-recipient sliding-window rate limiting for outbound email.
//!
//! In-process state only: the window resets on restart, which is acceptable
//! for an abuse brake on transactional email. Keys are recipient addresses
//! so unauthenticated lead submitters are limited too.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Sliding-window counter keyed by recipient address.
pub struct RateLimiter {
    max_per_window: usize,
    window: Duration,
    sends: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl RateLimiter {
    /// Create a limiter allowing `max_per_window` sends per `window`.
    pub fn new(max_per_window: usize, window: Duration) -> Self {
        Self {
            max_per_window,
            window,
            sends: Mutex::new(HashMap::new()),
        }
    }

    /// Try to reserve a send slot for the recipient.
    ///
    /// Returns `true` and records the send when under the limit, `false`
    /// otherwise. Expired entries are pruned on each call, so the map stays
    /// proportional to recently-active recipients.
    pub async fn try_acquire(&self, recipient: &str) -> bool {
        let now = Instant::now();
        let mut sends = self.sends.lock().await;
        let entry = sends.entry(recipient.to_string()).or_default();

        while let Some(front) = entry.front() {
            if now.duration_since(*front) > self.window {
                entry.pop_front();
            } else {
                break;
            }
        }

        if entry.len() >= self.max_per_window {
            return false;
        }
        entry.push_back(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allows_up_to_the_limit_then_blocks() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        for _ in 0..3 {
            assert!(limiter.try_acquire("a@example.com").await);
        }
        assert!(!limiter.try_acquire("a@example.com").await);
    }

    #[tokio::test]
    async fn recipients_are_limited_independently() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        assert!(limiter.try_acquire("a@example.com").await);
        assert!(limiter.try_acquire("b@example.com").await);
        assert!(!limiter.try_acquire("a@example.com").await);
    }

    #[tokio::test]
    async fn window_expiry_frees_slots() {
        let limiter = RateLimiter::new(1, Duration::from_millis(20));
        assert!(limiter.try_acquire("a@example.com").await);
        assert!(!limiter.try_acquire("a@example.com").await);
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(limiter.try_acquire("a@example.com").await);
    }
}
