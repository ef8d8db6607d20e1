//! Exponential backoff for network-backed offer sources.
//!
//! Only transient conditions (HTTP 429 and transport failures) are retried.
//! Everything else, including unexpected statuses and malformed pages, is
//! returned on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::SourceError;

fn is_retriable(err: &SourceError) -> bool {
    matches!(
        err,
        SourceError::RateLimited { .. } | SourceError::Http(_)
    )
}

/// Executes `operation`, retrying transient errors with exponential backoff.
///
/// The wait before the n-th retry is `backoff_base_secs * 2^(n-1)` seconds.
/// With `max_retries = 2` the operation runs at most 3 times. The caller's
/// wall-clock timeout still applies on top of this, so a long backoff
/// schedule is cut short by [`crate::SourceAdapter`].
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, SourceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SourceError>>,
{
    let mut attempt = 0u32;

    loop {
        let last_err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                err
            }
        };

        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %last_err,
            "transient source error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn rate_limited() -> SourceError {
        SourceError::RateLimited {
            source_name: "amazon".to_owned(),
            retry_after_secs: 0,
        }
    }

    #[tokio::test]
    async fn retries_on_rate_limited_then_succeeds() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(3, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                let n = cc.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(rate_limited())
                } else {
                    Ok::<u32, SourceError>(7)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(call_count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(1, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<u32, SourceError>(rate_limited())
            }
        })
        .await;
        assert_eq!(call_count.load(Ordering::SeqCst), 2);
        assert!(matches!(result, Err(SourceError::RateLimited { .. })));
    }

    #[tokio::test]
    async fn does_not_retry_unexpected_status() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(3, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<u32, SourceError>(SourceError::UnexpectedStatus {
                    status: 503,
                    url: "https://www.amazon.com/s?k=mug".to_owned(),
                })
            }
        })
        .await;
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(SourceError::UnexpectedStatus { .. })));
    }
}
