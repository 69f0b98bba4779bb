//! In-flight guard around one outbound call.
//!
//! A page keeps one [`Gateway`] per resource it loads. While a fetch is
//! running, [`Gateway::fetch`] refuses to start another one (it returns
//! `None` without polling the new future), which absorbs the duplicate
//! fetches rapid re-renders would otherwise trigger. The flag is released
//! when the call finishes, whatever its outcome, so a retry button can simply
//! call `fetch` again.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::ApiError;

#[derive(Clone, Debug, Default)]
pub struct Gateway {
    in_flight: Arc<AtomicBool>,
}

/// Clears the in-flight flag when dropped.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Gateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a call is currently running; drives loading indicators.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run `call` unless another call is already in flight.
    ///
    /// `None` means the call was skipped; `Some` carries its result.
    pub async fn fetch<T, F>(&self, call: F) -> Option<Result<T, ApiError>>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("fetch skipped: already in flight");
            return None;
        }
        let _guard = InFlight(&self.in_flight);
        Some(call.await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_duplicate_fetch_is_skipped() {
        let gateway = Gateway::new();
        let (tx, rx) = oneshot::channel::<()>();

        let first = {
            let gateway = gateway.clone();
            tokio::spawn(async move {
                gateway
                    .fetch(async move {
                        let _ = rx.await;
                        Ok::<_, ApiError>(1)
                    })
                    .await
            })
        };

        while !gateway.is_loading() {
            tokio::task::yield_now().await;
        }

        let mut polled = false;
        let second = gateway
            .fetch(async {
                polled = true;
                Ok::<_, ApiError>(2)
            })
            .await;
        assert!(second.is_none());
        assert!(!polled);

        tx.send(()).unwrap();
        assert_eq!(first.await.unwrap(), Some(Ok(1)));
        assert!(!gateway.is_loading());
    }

    #[tokio::test]
    async fn test_flag_released_after_failure() {
        let gateway = Gateway::new();
        let result = gateway
            .fetch(async { Err::<(), _>(ApiError::NoResponse("down".to_string())) })
            .await;
        assert_eq!(result, Some(Err(ApiError::NoResponse("down".to_string()))));
        assert!(!gateway.is_loading());

        // Retry re-invokes the same fetch
        let retry = gateway.fetch(async { Ok::<_, ApiError>(()) }).await;
        assert_eq!(retry, Some(Ok(())));
    }
}
