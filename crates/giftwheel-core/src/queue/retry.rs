//! Retry policy: decides backoff delays and the attempt budget.

use std::time::Duration;

/// Retry policy for failed deliveries.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Delay scheduled after the first failed attempt.
    pub base_delay: Duration,

    /// Backoff multiplier per attempt.
    pub multiplier: f64,

    /// Total attempts allowed. The last attempt failing leaves the record
    /// permanently failed; nothing further is scheduled.
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    /// Production policy: 60s base, doubling, 5 attempts.
    ///
    /// attempt 1 failing retries ~60s later, attempt 2 ~120s, attempt 3
    /// ~240s, attempt 4 ~480s; attempt 5 is the last.
    fn default() -> Self {
        Self {
            base_delay: Duration::from_secs(60),
            multiplier: 2.0,
            max_attempts: 5,
        }
    }
}

impl RetryPolicy {
    /// Delay before the next attempt, given the number of attempts already
    /// made (1-indexed): `base_delay * multiplier^(attempts - 1)`. Uncapped.
    pub fn next_delay(&self, attempts: u32) -> Duration {
        let base_secs = self.base_delay.as_secs_f64();
        let delay_secs = base_secs * self.multiplier.powi(attempts.saturating_sub(1) as i32);
        Duration::from_secs_f64(delay_secs)
    }
}
