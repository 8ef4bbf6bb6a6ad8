//! Backoff policy for overloaded responses.

use async_trait::async_trait;
use bmcc_core::config::CompletionConfig;
use std::time::Duration;

/// Bounded exponential backoff: `base_delay * 2^attempt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &CompletionConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            base_delay: config.base_delay(),
        }
    }

    /// Wait after the 0-based `attempt` failed.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Whether another attempt follows `attempt`.
    pub fn has_next(&self, attempt: u32) -> bool {
        attempt + 1 < self.max_attempts
    }
}

/// Waits between attempts. Tests swap in a recorder.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real waiting on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delays_double_from_base() {
        let policy = RetryPolicy::default();
        let delays: Vec<u64> = (0..5).map(|a| policy.delay_for(a).as_secs()).collect();
        assert_eq!(delays, vec![1, 2, 4, 8, 16]);
    }

    #[test]
    fn test_last_attempt_has_no_successor() {
        let policy = RetryPolicy::default();
        assert!(policy.has_next(0));
        assert!(policy.has_next(3));
        assert!(!policy.has_next(4));
    }

    #[test]
    fn test_from_config() {
        let config = CompletionConfig {
            max_attempts: 3,
            base_delay_secs: 2,
            ..CompletionConfig::default()
        };
        let policy = RetryPolicy::from_config(&config);
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay_for(2), Duration::from_secs(8));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_sleeper_advances_clock() {
        let start = tokio::time::Instant::now();
        TokioSleeper.sleep(Duration::from_secs(4)).await;
        assert!(start.elapsed() >= Duration::from_secs(4));
    }
}
