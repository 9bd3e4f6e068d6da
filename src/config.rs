use std::time::Duration;

use crate::constants::{cache, fetch};

/// Bounded retry schedule for failing external calls.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    /// Total attempts before the call is reported unavailable.
    pub attempts: u32,
    /// Delay before the second attempt.
    pub base_delay: Duration,
    /// Exponential multiplier applied per subsequent attempt.
    pub multiplier: f64,
    /// Ceiling on any single backoff delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: fetch::DEFAULT_RETRY_ATTEMPTS,
            base_delay: Duration::from_secs(1),
            multiplier: fetch::DEFAULT_BACKOFF_MULTIPLIER,
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Backoff delay before retrying after the given 1-based failed attempt.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        let scaled = self.base_delay.as_secs_f64() * self.multiplier.powi(exponent as i32);
        Duration::from_secs_f64(scaled.min(self.max_delay.as_secs_f64()))
    }

    /// Immediate single-attempt policy, useful in tests.
    pub fn none() -> Self {
        Self {
            attempts: 1,
            base_delay: Duration::ZERO,
            multiplier: 1.0,
            max_delay: Duration::ZERO,
        }
    }
}

/// Top-level audit configuration.
#[derive(Clone, Debug)]
pub struct AuditConfig {
    /// Variants per metric-source batch request; clamped to 1..=1000 at use.
    pub batch_size: usize,
    /// Candidates requested per brand search.
    pub top_n: usize,
    /// Cache entry lifetime in days.
    pub cache_ttl_days: i64,
    /// Retry schedule for external calls.
    pub retry: RetryPolicy,
    /// Courtesy pause after an uncached metric-source call.
    pub metric_pacing: Duration,
    /// Courtesy pause after an uncached candidate search.
    pub search_pacing: Duration,
    /// Courtesy pause after an uncached enrichment call.
    pub enrich_pacing: Duration,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            batch_size: fetch::DEFAULT_BATCH_SIZE,
            top_n: fetch::DEFAULT_TOP_N,
            cache_ttl_days: cache::DEFAULT_TTL_DAYS,
            retry: RetryPolicy::default(),
            metric_pacing: Duration::from_millis(fetch::DEFAULT_METRIC_PACING_MS),
            search_pacing: Duration::from_millis(fetch::DEFAULT_SEARCH_PACING_MS),
            enrich_pacing: Duration::from_millis(fetch::DEFAULT_ENRICH_PACING_MS),
        }
    }
}

impl AuditConfig {
    /// Batch size clamped to the metric-source contract bounds.
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.clamp(1, fetch::MAX_BATCH_SIZE)
    }

    /// Configuration with no pacing and no retries, for tests and dry runs.
    pub fn immediate() -> Self {
        Self {
            retry: RetryPolicy::none(),
            metric_pacing: Duration::ZERO,
            search_pacing: Duration::ZERO,
            enrich_pacing: Duration::ZERO,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_grows_and_caps() {
        let policy = RetryPolicy {
            attempts: 5,
            base_delay: Duration::from_millis(100),
            multiplier: 2.0,
            max_delay: Duration::from_millis(350),
        };
        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3), Duration::from_millis(350));
    }

    #[test]
    fn batch_size_is_clamped() {
        let mut config = AuditConfig::default();
        assert_eq!(config.effective_batch_size(), 700);
        config.batch_size = 0;
        assert_eq!(config.effective_batch_size(), 1);
        config.batch_size = 5000;
        assert_eq!(config.effective_batch_size(), 1000);
    }
}
