use helpai_core::{EndpointConfig, FetchResult};
use std::time::Duration;

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { max_attempts: 1, initial_delay_ms: 500, max_delay_ms: 10_000, backoff_multiplier: 2.0 }
    }
}

impl RetryConfig {
    /// Create from the `[endpoint]` section
    pub fn from_endpoint(endpoint: &EndpointConfig) -> Self {
        Self {
            max_attempts: endpoint.retry_count.max(1),
            initial_delay_ms: endpoint.retry_delay_ms,
            ..Default::default()
        }
    }

    /// Calculate delay for the given attempt (0-indexed)
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay_ms = if attempt == 0 {
            0
        } else {
            let delay = self.initial_delay_ms as f64 * self.backoff_multiplier.powi(attempt as i32 - 1);
            delay.min(self.max_delay_ms as f64) as u64
        };

        Duration::from_millis(delay_ms)
    }

    /// Check if we should retry given the attempt number
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

/// Whether a finished attempt is worth repeating
///
/// Only attempts that produced no data and a transient error qualify.
pub fn is_retryable(result: &FetchResult) -> bool {
    result.payload().is_none() && result.error.as_ref().is_some_and(|e| e.is_retryable())
}
