//! Retry policy configuration.

use framewise_error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio_retry2::strategy::jitter;

/// Attempt budget and backoff schedule for provider calls.
///
/// The wait after failed attempt `n` (counted from 0) is
/// `base_delay_ms * 2^n`: with the defaults 1s, 2s, 4s, 8s, 16s.
///
/// # Examples
///
/// ```
/// use framewise_retry::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(*policy.max_attempts(), 5);
/// assert_eq!(policy.backoff(3), Duration::from_secs(8));
///
/// // Five attempts leave four gaps between them.
/// let waits: Vec<_> = policy.schedule().collect();
/// assert_eq!(waits.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(deny_unknown_fields)]
pub struct RetryPolicy {
    /// Total attempts per request, including the first (default 5).
    #[serde(default = "default_max_attempts")]
    max_attempts: u32,

    /// Delay after the first failed attempt, doubled for each later one (default 1000).
    #[serde(default = "default_base_delay_ms")]
    base_delay_ms: u64,

    /// Randomise each wait to spread out concurrent clients (default false).
    #[serde(default)]
    jitter: bool,
}

fn default_max_attempts() -> u32 {
    5
}

fn default_base_delay_ms() -> u64 {
    1000
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            jitter: false,
        }
    }
}

impl RetryPolicy {
    /// Creates a new retry policy builder.
    pub fn builder() -> RetryPolicyBuilder {
        RetryPolicyBuilder::default()
    }

    /// Validates the attempt budget.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_attempts` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::new("retry.max_attempts must be at least 1"));
        }
        Ok(())
    }

    /// Wait that follows failed attempt `attempt` (counted from 0).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        Duration::from_millis(self.base_delay_ms.saturating_mul(factor))
    }

    /// Waits between consecutive attempts, in order.
    ///
    /// Yields `max_attempts - 1` durations, since no wait follows the last
    /// attempt.
    pub fn schedule(&self) -> impl Iterator<Item = Duration> + Send + 'static {
        let policy = self.clone();
        (0..self.max_attempts.saturating_sub(1)).map(move |attempt| policy.backoff(attempt))
    }

    /// Waits for one request, jittered when `jitter` is set.
    ///
    /// Each call draws fresh jitter, scaling every wait by a factor in
    /// `[0.5, 1.5)`.
    pub fn planned_waits(&self) -> Vec<Duration> {
        if self.jitter {
            self.schedule().map(jitter).collect()
        } else {
            self.schedule().collect()
        }
    }

    /// Total time spent waiting for one request without jitter.
    pub fn worst_case_wait(&self) -> Duration {
        self.schedule().sum()
    }
}

/// Builder for `RetryPolicy`.
#[derive(Debug, Default)]
pub struct RetryPolicyBuilder {
    max_attempts: Option<u32>,
    base_delay_ms: Option<u64>,
    jitter: Option<bool>,
}

impl RetryPolicyBuilder {
    /// Sets the attempt budget.
    pub fn max_attempts(mut self, value: u32) -> Self {
        self.max_attempts = Some(value);
        self
    }

    /// Sets the first backoff delay in milliseconds.
    pub fn base_delay_ms(mut self, value: u64) -> Self {
        self.base_delay_ms = Some(value);
        self
    }

    /// Enables or disables jitter.
    pub fn jitter(mut self, value: bool) -> Self {
        self.jitter = Some(value);
        self
    }

    /// Builds the `RetryPolicy`.
    pub fn build(self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.unwrap_or_else(default_max_attempts),
            base_delay_ms: self.base_delay_ms.unwrap_or_else(default_base_delay_ms),
            jitter: self.jitter.unwrap_or(false),
        }
    }
}
