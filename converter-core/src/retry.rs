//! Bounded exponential-backoff retry.

use std::fmt;
use std::future::Future;
use std::time::Duration;

/// Whether a failed attempt is worth repeating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Transient,
    Fatal,
}

/// Bounded exponential-backoff retry policy.
///
/// The engine is generic: classification is supplied by the caller as a
/// function over the error value, so the policy never inspects concrete
/// error types. No jitter is applied; the schedule is deterministic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_millis(1500),
            backoff_factor: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Delay slept before attempt `attempt` (1-based).
    ///
    /// The first attempt runs immediately; attempt k >= 2 waits
    /// `min(max_delay, initial_delay * backoff_factor^(k-2))`.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }
        self.initial_delay
            .mul_f64(self.backoff_factor.powi((attempt - 2) as i32))
            .min(self.max_delay)
    }

    /// Runs `op` until it succeeds, fails fatally, or the attempt budget
    /// is spent. The last error is returned unchanged; no delay is slept
    /// after the final attempt.
    pub async fn run<T, E, F, Fut, C>(&self, classify: C, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        C: Fn(&E) -> ErrorClass,
        E: fmt::Display,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if classify(&err) == ErrorClass::Fatal || attempt >= self.max_attempts {
                        return Err(err);
                    }
                    let delay = self.delay_before(attempt + 1);
                    tracing::warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "attempt failed, retrying: {err}"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(err: &&'static str) -> ErrorClass {
        if err.starts_with("transient") {
            ErrorClass::Transient
        } else {
            ErrorClass::Fatal
        }
    }

    #[test]
    fn test_delay_schedule() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_before(1), Duration::ZERO);
        assert_eq!(policy.delay_before(2), Duration::from_millis(200));
        assert_eq!(policy.delay_before(3), Duration::from_millis(400));
        assert_eq!(policy.delay_before(4), Duration::from_millis(800));
        assert_eq!(policy.delay_before(5), Duration::from_millis(1500));
        assert_eq!(policy.delay_before(10), Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn test_success_first_attempt() {
        let policy = RetryPolicy::default();
        let mut calls = 0;
        let result: Result<i32, &'static str> = policy
            .run(classify, || {
                calls += 1;
                async { Ok(42) }
            })
            .await;
        assert_eq!(result, Ok(42));
        assert_eq!(calls, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_exhausts_budget() {
        let policy = RetryPolicy::default();
        let mut calls = 0;
        let result: Result<i32, &'static str> = policy
            .run(classify, || {
                calls += 1;
                async { Err("transient: connection reset") }
            })
            .await;
        assert_eq!(result, Err("transient: connection reset"));
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn test_fatal_not_retried() {
        let policy = RetryPolicy::default();
        let mut calls = 0;
        let result: Result<i32, &'static str> = policy
            .run(classify, || {
                calls += 1;
                async { Err("fatal: invalid key") }
            })
            .await;
        assert_eq!(result, Err("fatal: invalid key"));
        assert_eq!(calls, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_after_transient_failures() {
        let policy = RetryPolicy::default();
        let mut calls = 0;
        let result: Result<i32, &'static str> = policy
            .run(classify, || {
                calls += 1;
                let outcome = if calls < 3 { Err("transient: 503") } else { Ok(7) };
                async move { outcome }
            })
            .await;
        assert_eq!(result, Ok(7));
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn test_single_attempt_policy() {
        let policy = RetryPolicy {
            max_attempts: 1,
            ..RetryPolicy::default()
        };
        let mut calls = 0;
        let result: Result<i32, &'static str> = policy
            .run(classify, || {
                calls += 1;
                async { Err("transient: timeout") }
            })
            .await;
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }
}
