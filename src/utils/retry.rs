//! Retry policy for rate-limited requests
//!
//! The fetcher retries only on rate limiting. Between retries it waits for a
//! cooldown, which is fixed by default and can optionally grow exponentially.
//! Every attempt is additionally preceded by a short fixed pause.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How the cooldown evolves across consecutive rate-limit responses
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Backoff {
    /// Always wait the base cooldown
    #[default]
    Fixed,

    /// `cooldown * multiplier^(n - 1)`, capped at `max_secs`
    Exponential { multiplier: f64, max_secs: u64 },
}

/// Configuration for retry behavior
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of request attempts
    pub max_retries: u32,

    /// Base cooldown after a rate-limit response
    pub cooldown: Duration,

    /// Pause issued before every request attempt
    pub pre_request_delay: Duration,

    /// Cooldown growth strategy
    pub backoff: Backoff,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            cooldown: Duration::from_secs(60),
            pre_request_delay: Duration::from_secs(3),
            backoff: Backoff::Fixed,
        }
    }
}

impl RetryConfig {
    /// Create a new retry configuration with custom max retries
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    /// Create a retry configuration with custom delays
    pub fn with_delays(max_retries: u32, cooldown: Duration, pre_request_delay: Duration) -> Self {
        Self {
            max_retries,
            cooldown,
            pre_request_delay,
            backoff: Backoff::Fixed,
        }
    }

    /// Replace the backoff strategy
    #[must_use]
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Cooldown to apply after the `rate_limited`-th consecutive rate-limit response (1-based)
    pub fn cooldown_for(&self, rate_limited: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed => self.cooldown,
            Backoff::Exponential {
                multiplier,
                max_secs,
            } => {
                let exponent = rate_limited.saturating_sub(1) as i32;
                let scaled = self.cooldown.as_secs_f64() * multiplier.powi(exponent);
                let capped = scaled.min(max_secs as f64).max(0.0);
                Duration::from_secs_f64(capped)
            }
        }
    }

    /// Worst-case time spent pausing for one fetch
    pub fn worst_case_wait(&self) -> Duration {
        (1..=self.max_retries).fold(Duration::ZERO, |total, attempt| {
            total + self.pre_request_delay + self.cooldown_for(attempt)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.cooldown, Duration::from_secs(60));
        assert_eq!(config.pre_request_delay, Duration::from_secs(3));
        assert_eq!(config.backoff, Backoff::Fixed);
    }

    #[test]
    fn test_fixed_cooldown() {
        let config = RetryConfig::default();

        assert_eq!(config.cooldown_for(1), Duration::from_secs(60));
        assert_eq!(config.cooldown_for(4), Duration::from_secs(60));
    }

    #[test]
    fn test_exponential_cooldown() {
        let config = RetryConfig::with_delays(5, Duration::from_secs(10), Duration::ZERO)
            .with_backoff(Backoff::Exponential {
                multiplier: 2.0,
                max_secs: 50,
            });

        assert_eq!(config.cooldown_for(1), Duration::from_secs(10));
        assert_eq!(config.cooldown_for(2), Duration::from_secs(20));
        assert_eq!(config.cooldown_for(3), Duration::from_secs(40));
        // Capped
        assert_eq!(config.cooldown_for(4), Duration::from_secs(50));
    }

    #[test]
    fn test_worst_case_wait() {
        let config = RetryConfig::default();
        assert_eq!(config.worst_case_wait(), Duration::from_secs(5 * 63));

        let none = RetryConfig::new(0);
        assert_eq!(none.worst_case_wait(), Duration::ZERO);
    }
}
