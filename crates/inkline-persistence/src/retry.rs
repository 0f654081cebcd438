//! Read-after-write retry for replica-lagged lookups.
//!
//! The backing store acknowledges writes before they become visible to
//! subsequent reads. A lookup issued right after a write (fetching the
//! profile a signup just created, resolving the artist row an onboarding
//! flow just inserted) can therefore observe zero rows for a short window.
//!
//! [`fetch_with_retry`] wraps a single-record lookup and re-attempts it
//! while the record is still invisible, sleeping a fixed delay between
//! attempts. Only the "zero rows" outcome (`Ok(None)`) is retried; any
//! other error is returned on first occurrence, since permission failures
//! and malformed queries do not resolve by waiting.
//!
//! Attempts within one invocation are strictly sequential and the only
//! suspension point is the non-blocking inter-attempt sleep. Dropping the
//! returned future mid-delay makes no further attempts.

use std::future::Future;
use std::time::Duration;

/// Retry policy for one lookup invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total lookup attempts, including the first. Must be at least 1.
    pub max_attempts: u32,
    /// Pause between consecutive attempts. Zero is allowed.
    pub delay: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Default policy for profile reads issued right after signup.
    #[must_use]
    pub const fn profile_read() -> Self {
        Self::new(3, Duration::from_millis(1000))
    }

    /// Default policy for artist lookups issued right after onboarding.
    #[must_use]
    pub const fn artist_read() -> Self {
        Self::new(3, Duration::from_millis(1500))
    }
}

/// Failure outcome of [`fetch_with_retry`].
#[derive(Debug, thiserror::Error)]
pub enum FetchError<E> {
    /// The policy was malformed; no lookup was attempted.
    #[error("invalid retry policy: max_attempts must be at least 1")]
    InvalidPolicy,

    /// Every attempt observed zero matching records. The record either does
    /// not exist or replication lag outlasted the retry budget; callers
    /// cannot tell which and must treat both as "unavailable now".
    #[error("record not visible after {attempts} attempts")]
    NotFound { attempts: u32 },

    /// The lookup failed with something other than "zero rows". Never
    /// retried.
    #[error("lookup failed: {0}")]
    Lookup(#[source] E),
}

/// Resolve a possibly-not-yet-replicated lookup into a record or a terminal
/// failure.
///
/// `lookup` is invoked up to `policy.max_attempts` times. `Ok(Some(record))`
/// returns immediately; `Ok(None)` sleeps `policy.delay` and retries until
/// the budget runs out; `Err` propagates on first occurrence. No delay is
/// issued after the final attempt.
///
/// # Errors
///
/// [`FetchError::InvalidPolicy`] if `policy.max_attempts` is zero (checked
/// before the first attempt), [`FetchError::NotFound`] once the budget is
/// exhausted, [`FetchError::Lookup`] for any non-"zero rows" failure.
pub async fn fetch_with_retry<T, E, F, Fut>(
    policy: RetryPolicy,
    mut lookup: F,
) -> Result<T, FetchError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    if policy.max_attempts < 1 {
        return Err(FetchError::InvalidPolicy);
    }

    let mut attempt = 0;
    loop {
        attempt += 1;
        match lookup().await {
            Ok(Some(record)) => return Ok(record),
            Ok(None) if attempt < policy.max_attempts => {
                tracing::debug!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    delay_ms = policy.delay.as_millis() as u64,
                    "record not visible yet, retrying after delay"
                );
                tokio::time::sleep(policy.delay).await;
            }
            Ok(None) => {
                tracing::debug!(attempts = attempt, "record never became visible");
                return Err(FetchError::NotFound { attempts: attempt });
            }
            Err(e) => return Err(FetchError::Lookup(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PersistenceError;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    fn policy(max_attempts: u32, delay_ms: u64) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::from_millis(delay_ms))
    }

    #[tokio::test]
    async fn returns_record_on_first_attempt() {
        let calls = AtomicU32::new(0);

        let result = fetch_with_retry(policy(3, 100), || {
            calls.fetch_add(1, Ordering::Relaxed);
            async { Ok::<_, PersistenceError>(Some(42)) }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausts_budget_when_record_never_appears() {
        let calls = AtomicU32::new(0);

        let result = fetch_with_retry(policy(3, 100), || {
            calls.fetch_add(1, Ordering::Relaxed);
            async { Ok::<Option<i32>, PersistenceError>(None) }
        })
        .await;

        assert!(
            matches!(result, Err(FetchError::NotFound { attempts: 3 })),
            "expected NotFound after 3 attempts, got: {result:?}",
        );
        assert_eq!(calls.load(Ordering::Relaxed), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn returns_record_once_it_becomes_visible() {
        let calls = AtomicU32::new(0);
        let start = Instant::now();

        // Not found twice, then the replica catches up.
        let result = fetch_with_retry(policy(3, 100), || {
            let attempt = calls.fetch_add(1, Ordering::Relaxed) + 1;
            async move {
                if attempt < 3 {
                    Ok::<_, PersistenceError>(None)
                } else {
                    Ok(Some("abc".to_string()))
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "abc");
        assert_eq!(calls.load(Ordering::Relaxed), 3);
        // Two inter-attempt delays, none after the success.
        assert_eq!(start.elapsed(), Duration::from_millis(200));
    }

    #[tokio::test]
    async fn propagates_other_errors_without_retrying() {
        let calls = AtomicU32::new(0);

        let result = fetch_with_retry(policy(5, 50), || {
            calls.fetch_add(1, Ordering::Relaxed);
            async {
                Err::<Option<i32>, _>(PersistenceError::Scylla("permission denied".to_string()))
            }
        })
        .await;

        match result {
            Err(FetchError::Lookup(PersistenceError::Scylla(detail))) => {
                assert_eq!(detail, "permission denied");
            }
            other => panic!("expected Lookup error, got: {other:?}"),
        }
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn rejects_zero_attempt_policy_before_any_lookup() {
        let calls = AtomicU32::new(0);

        let result = fetch_with_retry(policy(0, 100), || {
            calls.fetch_add(1, Ordering::Relaxed);
            async { Ok::<_, PersistenceError>(Some(1)) }
        })
        .await;

        assert!(matches!(result, Err(FetchError::InvalidPolicy)));
        assert_eq!(calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn issues_no_delay_after_final_attempt() {
        let start = Instant::now();

        let result = fetch_with_retry(policy(2, 50), || async {
            Ok::<Option<i32>, PersistenceError>(None)
        })
        .await;

        assert!(matches!(result, Err(FetchError::NotFound { attempts: 2 })));
        // One delay between the two attempts, nothing trailing.
        assert_eq!(start.elapsed(), Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_future_mid_delay_stops_retrying() {
        let calls = std::sync::Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let fetch = fetch_with_retry(policy(3, 1000), move || {
            counter.fetch_add(1, Ordering::Relaxed);
            async { Ok::<Option<i32>, PersistenceError>(None) }
        });

        tokio::select! {
            _ = fetch => panic!("fetch should have been cancelled mid-delay"),
            () = tokio::time::sleep(Duration::from_millis(50)) => {}
        }

        // The first attempt ran; the delay was cancelled before attempt 2.
        assert_eq!(calls.load(Ordering::Relaxed), 1);
        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_delay_policy_retries_back_to_back() {
        let calls = AtomicU32::new(0);
        let start = Instant::now();

        let result = fetch_with_retry(policy(4, 0), || {
            calls.fetch_add(1, Ordering::Relaxed);
            async { Ok::<Option<i32>, PersistenceError>(None) }
        })
        .await;

        assert!(matches!(result, Err(FetchError::NotFound { attempts: 4 })));
        assert_eq!(calls.load(Ordering::Relaxed), 4);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[test]
    fn default_policies_match_tuned_call_sites() {
        assert_eq!(RetryPolicy::profile_read(), policy(3, 1000));
        assert_eq!(RetryPolicy::artist_read(), policy(3, 1500));
    }
}
