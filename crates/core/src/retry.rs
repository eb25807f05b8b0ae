//! Retry policy for upstream requests.
//!
//! The transport decides *when* an attempt failed; this module decides
//! whether to try again and how long to wait first.

use std::time::Duration;

/// How long to wait between attempts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    /// The same delay before every retry.
    Fixed(Duration),
    /// A delay that grows by `multiplier` after each retry, clamped to `max`.
    Exponential {
        initial: Duration,
        max: Duration,
        multiplier: f64,
    },
}

/// Retry policy applied to a single upstream request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Number of retries after the first attempt.
    pub max_retries: u32,
    pub backoff: Backoff,
    /// Whether 4xx responses (other than 429) are retried.
    pub retry_client_errors: bool,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_RETRIES: u32 = 3;
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(5);

    /// A policy that retries `max_retries` times with a fixed delay.
    pub fn fixed(max_retries: u32, delay: Duration) -> Self {
        Self {
            max_retries,
            backoff: Backoff::Fixed(delay),
            retry_client_errors: true,
        }
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self::fixed(0, Duration::ZERO)
    }

    /// Total number of attempts, including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// The delay before retry number `retry` (1-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed(delay) => delay,
            Backoff::Exponential {
                initial,
                max,
                multiplier,
            } => {
                let exponent = retry.saturating_sub(1).min(i32::MAX as u32) as i32;
                let millis = initial.as_millis() as f64 * multiplier.powi(exponent);
                if !millis.is_finite() || millis >= max.as_millis() as f64 {
                    max
                } else {
                    Duration::from_millis(millis as u64)
                }
            }
        }
    }

    /// Whether a failed attempt should be retried.
    ///
    /// `status` is `None` when no response was received at all.
    pub fn should_retry(&self, status: Option<u16>) -> bool {
        match status {
            None => true,
            Some(429) => true,
            Some(code) if (400..500).contains(&code) => self.retry_client_errors,
            Some(_) => true,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::fixed(Self::DEFAULT_MAX_RETRIES, Self::DEFAULT_DELAY)
    }
}
