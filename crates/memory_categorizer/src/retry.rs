//! Bounded retry with exponential backoff

use backoff::{backoff::Backoff, ExponentialBackoff};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Retry policy for a fallible async operation
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Wait after the first failure
    pub initial_delay: Duration,
    /// Growth factor applied per failed attempt, at least 1.0
    pub multiplier: f64,
    /// Upper bound for any single wait
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(4),
            multiplier: 2.0,
            max_delay: Duration::from_secs(15),
        }
    }
}

impl RetryPolicy {
    /// Create a new RetryPolicy with default backoff and the given attempt cap
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Default::default()
        }
    }

    /// Set the initial delay
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the backoff multiplier
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Set the delay cap
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Exponential backoff schedule for one `run`, without jitter or elapsed-time cap
    fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            current_interval: self.initial_delay,
            initial_interval: self.initial_delay,
            randomization_factor: 0.0,
            multiplier: self.multiplier,
            max_interval: self.max_delay,
            max_elapsed_time: None,
            ..Default::default()
        }
    }

    /// Wait time after `failed_attempts` consecutive failures (1-based)
    pub fn delay_for(&self, failed_attempts: u32) -> Duration {
        let mut backoff = self.backoff();
        for _ in 1..failed_attempts {
            if backoff.current_interval >= self.max_delay {
                break;
            }
            backoff.next_backoff();
        }
        backoff.next_backoff().unwrap_or(self.max_delay)
    }

    /// Run `op` until it succeeds or the attempt cap is reached
    ///
    /// `op` receives the 1-based attempt number. The error of the final
    /// attempt is returned unchanged.
    pub async fn run<F, Fut, T, E>(&self, mut op: F) -> std::result::Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: Display,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut backoff = self.backoff();
        let mut attempts = 0;

        loop {
            attempts += 1;

            match op(attempts).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    if attempts >= max_attempts {
                        warn!(attempts, "Max retries exceeded");
                        return Err(e);
                    }

                    match backoff.next_backoff() {
                        Some(delay) => {
                            warn!(
                                attempt = attempts,
                                error = %e,
                                retry_in_ms = delay.as_millis(),
                                "Attempt failed, retrying"
                            );
                            tokio::time::sleep(delay).await;
                        }
                        None => {
                            warn!(attempts, "Backoff exhausted");
                            return Err(e);
                        }
                    }
                }
            }
        }
    }
}
