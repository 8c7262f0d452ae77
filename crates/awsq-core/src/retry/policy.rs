use std::time::Duration;

/// Decision for a retryable failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Sleep, then resend the same signed body.
    RetryAfter(Duration),
    /// Retry ceiling reached; report retries exhausted.
    GiveUp,
}

/// Exponential backoff: `base_delay * backoff_factor^retry`, optionally capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt.
    pub max_error_retry: u32,
    pub base_delay: Duration,
    pub backoff_factor: u32,
    /// Upper bound on a single delay; `None` leaves delays uncapped.
    pub max_delay: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_error_retry: 3,
            base_delay: Duration::from_millis(100),
            backoff_factor: 4,
            max_delay: None,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (1-based).
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = self.backoff_factor.saturating_pow(retry);
        let raw = self.base_delay.saturating_mul(factor);
        match self.max_delay {
            Some(cap) => raw.min(cap),
            None => raw,
        }
    }

    /// Decide what follows a retryable failure of attempt number `attempt`
    /// (1-based). Attempt `n` failing means retry `n` would come next.
    pub fn decide(&self, attempt: u32) -> RetryDecision {
        if attempt > self.max_error_retry {
            RetryDecision::GiveUp
        } else {
            RetryDecision::RetryAfter(self.backoff(attempt))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_backoff_is_100ms_times_4_pow_n() {
        let p = RetryPolicy::default();
        assert_eq!(p.backoff(1), Duration::from_millis(400));
        assert_eq!(p.backoff(2), Duration::from_millis(1600));
        assert_eq!(p.backoff(3), Duration::from_millis(6400));
    }

    #[test]
    fn gives_up_after_max_error_retry() {
        let p = RetryPolicy::default();
        assert_eq!(p.decide(1), RetryDecision::RetryAfter(Duration::from_millis(400)));
        assert_eq!(p.decide(3), RetryDecision::RetryAfter(Duration::from_millis(6400)));
        assert_eq!(p.decide(4), RetryDecision::GiveUp);
    }

    #[test]
    fn zero_retries_gives_up_immediately() {
        let p = RetryPolicy {
            max_error_retry: 0,
            ..RetryPolicy::default()
        };
        assert_eq!(p.decide(1), RetryDecision::GiveUp);
    }

    #[test]
    fn cap_and_saturation() {
        let p = RetryPolicy {
            max_error_retry: 100,
            max_delay: Some(Duration::from_secs(2)),
            ..RetryPolicy::default()
        };
        assert_eq!(p.backoff(2), Duration::from_millis(1600));
        assert_eq!(p.backoff(3), Duration::from_secs(2));
        // 4^60 overflows u32; must saturate instead of panicking.
        assert_eq!(p.backoff(60), Duration::from_secs(2));
    }
}
