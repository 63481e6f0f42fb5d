//! Bounded retry for rate-limited API calls.

use std::future::Future;
use std::time::{Duration, Instant};

use backoff::backoff::Backoff;
use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};

use crate::error::{Error, Result};

/// Wall-clock ceiling for one retried operation.
pub(crate) const RETRY_CEILING: Duration = Duration::from_secs(120);

pub(crate) fn default_policy() -> ExponentialBackoff {
    ExponentialBackoffBuilder::new()
        .with_initial_interval(Duration::from_millis(500)) // first retry after 500ms
        .with_multiplier(2.0) // all following retries are twice as long as the previous one
        .with_max_elapsed_time(Some(RETRY_CEILING))
        .build()
}

/// Re-invokes `op` until it succeeds, fails with a non-retryable error or
/// the retry ceiling is exceeded.
pub(crate) async fn retry<T, F, Fut>(op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    retry_with_policy(default_policy(), op).await
}

/// Like [`retry`], with the backoff schedule supplied by the caller.
///
/// Errors classified retryable by [`Error::is_retryable`] sleep out the next
/// backoff interval and try again; anything else terminates immediately.
/// When the schedule is exhausted the last observed error is surfaced
/// wrapped in [`Error::RetryTimeout`].
pub(crate) async fn retry_with_policy<T, F, Fut>(
    mut policy: ExponentialBackoff,
    mut op: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let started = Instant::now();
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() => match policy.next_backoff() {
                Some(delay) => tokio::time::sleep(delay).await,
                None => {
                    return Err(Error::RetryTimeout {
                        elapsed: started.elapsed(),
                        source: Box::new(err),
                    })
                }
            },
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::{ApiError, Operation};

    fn rate_limited() -> Error {
        Error::Api(ApiError::new(429, Operation::Create))
    }

    fn short_policy() -> ExponentialBackoff {
        ExponentialBackoffBuilder::new()
            .with_initial_interval(Duration::from_millis(1))
            .with_multiplier(2.0)
            .with_max_elapsed_time(Some(Duration::from_millis(50)))
            .build()
    }

    #[tokio::test]
    async fn fatal_error_terminates_after_one_attempt() {
        let attempts = AtomicUsize::new(0);
        let res: Result<()> = retry_with_policy(short_policy(), || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(Error::Api(ApiError::new(409, Operation::Create))) }
        })
        .await;

        assert!(matches!(res, Err(Error::Api(e)) if e.status == 409));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retryable_error_is_retried_until_success() {
        let attempts = AtomicUsize::new(0);
        let res = retry_with_policy(short_policy(), || {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(rate_limited())
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(res.expect("third attempt succeeds"), 2);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn exhausted_schedule_surfaces_timeout_wrapping_last_error() {
        let res: Result<()> =
            retry_with_policy(short_policy(), || async { Err(rate_limited()) }).await;

        match res {
            Err(Error::RetryTimeout { source, .. }) => {
                assert!(source.to_string().contains("429"));
            }
            other => panic!("expected retry timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn success_needs_no_backoff() {
        let res = retry_with_policy(short_policy(), || async { Ok(42) }).await;
        assert_eq!(res.expect("first attempt succeeds"), 42);
    }
}
