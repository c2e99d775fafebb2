//! A bounded retry-with-backoff policy shared by every outbound HTTP call.

use rand::Rng;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(8);
// Servers may ask for longer waits than our own backoff; never sleep longer than this.
const MAX_RETRY_AFTER: Duration = Duration::from_secs(30);

/// Statuses worth another attempt: rate limiting and the gateway/server family.
pub fn default_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// The outcome of a single failed attempt, as classified by the call site.
#[derive(Debug)]
pub enum AttemptError<E> {
    /// The failure may go away on its own; `retry_after` overrides the backoff when present.
    Transient {
        error: E,
        retry_after: Option<Duration>,
    },
    /// Trying again won't help (bad credentials, malformed request, ...).
    Permanent(E),
}

impl<E> AttemptError<E> {
    pub fn transient(error: E) -> Self {
        AttemptError::Transient {
            error,
            retry_after: None,
        }
    }
}

/// Returned by [RetryPolicy::run] when the operation never succeeded.
#[derive(Debug)]
pub struct RetryFailure<E> {
    /// The error from the final attempt.
    pub error: E,
    /// How many attempts were made, including the first.
    pub attempts: u32,
    /// `true` when every attempt failed transiently, `false` when a permanent error stopped the loop.
    pub exhausted: bool,
}

/// Describes how many times an operation is attempted and how long to wait in between.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_backoff: Duration,
    max_backoff: Duration,
    jitter: bool,
}

impl RetryPolicy {
    /// Create a policy making at most `max_attempts` attempts (never fewer than one) with
    /// exponential backoff starting at one second.
    pub fn new(max_attempts: u32) -> Self {
        RetryPolicy {
            max_attempts: max_attempts.max(1),
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
            max_backoff: DEFAULT_MAX_BACKOFF,
            jitter: true,
        }
    }

    pub fn with_backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.initial_backoff = initial;
        self.max_backoff = max.max(initial);
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn is_retryable_status(&self, status: u16) -> bool {
        default_retryable_status(status)
    }

    /// The base delay after the `failures`-th consecutive failure: `initial * 2^(failures - 1)`,
    /// capped at the maximum backoff.
    pub fn delay_for(&self, failures: u32) -> Duration {
        let exponent = failures.saturating_sub(1).min(16);
        self.initial_backoff
            .saturating_mul(1u32 << exponent)
            .min(self.max_backoff)
    }

    fn sleep_duration(&self, failures: u32, retry_after: Option<Duration>) -> Duration {
        if let Some(requested) = retry_after {
            return requested.min(MAX_RETRY_AFTER);
        }
        let base = self.delay_for(failures);
        if !self.jitter || base.is_zero() {
            return base;
        }
        let spread = (base.as_millis() / 4) as u64;
        base + Duration::from_millis(rand::thread_rng().gen_range(0..=spread))
    }

    /// Run `operation` until it succeeds, fails permanently, or the attempts run out.
    ///
    /// The closure receives the 1-based attempt number. `name` only appears in logs.
    pub async fn run<T, E, F, Fut>(&self, name: &str, mut operation: F) -> Result<T, RetryFailure<E>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, AttemptError<E>>>,
        E: Display,
    {
        let mut attempt = 1;
        loop {
            match operation(attempt).await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(operation = name, attempt, "Succeeded after retrying.");
                    }
                    return Ok(value);
                }
                Err(AttemptError::Permanent(error)) => {
                    debug!(operation = name, attempt, error = %error, "Attempt failed permanently.");
                    return Err(RetryFailure {
                        error,
                        attempts: attempt,
                        exhausted: false,
                    });
                }
                Err(AttemptError::Transient { error, retry_after }) => {
                    if attempt >= self.max_attempts {
                        warn!(
                            operation = name,
                            attempts = attempt,
                            error = %error,
                            "Giving up after exhausting all attempts."
                        );
                        return Err(RetryFailure {
                            error,
                            attempts: attempt,
                            exhausted: true,
                        });
                    }
                    let delay = self.sleep_duration(attempt, retry_after);
                    warn!(
                        operation = name,
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "Attempt failed; retrying."
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::new(4)
    }
}
