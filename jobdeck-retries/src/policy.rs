//! Retry policy for transport failures.

use crate::wait::WaitStrategy;
use std::time::Duration;

/// Decides whether a transport failure is retried and at what delay.
///
/// The policy only covers attempts that never received an HTTP response;
/// status codes are handled by the dispatcher and never reach it. The
/// default budget is a single retry after a fixed one-second delay.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of transport retries per logical request.
    pub max_retries: u32,
    /// Wait strategy between attempts.
    pub wait: WaitStrategy,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            wait: WaitStrategy::Fixed(Duration::from_secs(1)),
        }
    }
}

impl RetryPolicy {
    /// Create the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of transport retries.
    #[must_use]
    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    /// Use a fixed delay.
    #[must_use]
    pub fn fixed(mut self, delay: Duration) -> Self {
        self.wait = WaitStrategy::Fixed(delay);
        self
    }

    /// Use a jittered delay.
    #[must_use]
    pub fn jittered(mut self, base: Duration, jitter: f64) -> Self {
        self.wait = WaitStrategy::Jittered { base, jitter };
        self
    }

    /// A policy that never retries.
    pub fn no_retry() -> Self {
        Self::new().max_retries(0)
    }

    /// Whether another retry is allowed after `retries_used` retries.
    pub fn allows(&self, retries_used: u32) -> bool {
        retries_used < self.max_retries
    }

    /// Delay to wait before the next retry.
    pub fn delay(&self) -> Duration {
        self.wait.calculate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_allows_exactly_one_retry() {
        let policy = RetryPolicy::default();
        assert!(policy.allows(0));
        assert!(!policy.allows(1));
        assert_eq!(policy.delay(), Duration::from_secs(1));
    }

    #[test]
    fn no_retry_never_allows() {
        assert!(!RetryPolicy::no_retry().allows(0));
    }

    #[rstest]
    #[case(0, true)]
    #[case(2, true)]
    #[case(3, false)]
    fn budget_is_bounded(#[case] used: u32, #[case] allowed: bool) {
        let policy = RetryPolicy::new().max_retries(3);
        assert_eq!(policy.allows(used), allowed);
    }

    #[test]
    fn builder_sets_strategy() {
        let policy = RetryPolicy::new()
            .max_retries(2)
            .jittered(Duration::from_millis(200), 0.1);
        assert_eq!(policy.max_retries, 2);
        assert!(matches!(policy.wait, WaitStrategy::Jittered { .. }));
    }
}
