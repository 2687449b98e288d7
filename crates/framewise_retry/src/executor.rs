//! Resilient execution of a single inference request.

use crate::RetryPolicy;
use framewise_core::InferenceRequest;
use framewise_error::{ProviderError, ProviderErrorKind, ProviderResult, RetryableError};
use framewise_interface::VisionDriver;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio_retry2::{Retry, RetryError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, instrument, warn};

/// Performs one inference call with retry and exponential backoff.
///
/// For each attempt:
/// 1. Checks the cancellation token, if any
/// 2. Calls the driver once
/// 3. On a retryable failure with budget left, logs a warning and waits
///    the planned wait for that attempt before the next one
/// 4. On a retryable failure with no budget left, logs an error and fails
///    with `RetriesExhausted`
/// 5. On a fatal failure, fails immediately
///
/// Waits suspend the caller; nothing else proceeds in the meantime. The
/// executor holds no state between calls besides the shared driver handle.
pub struct ResilientRequestExecutor<D: ?Sized> {
    driver: Arc<D>,
    policy: RetryPolicy,
    cancel: Option<CancellationToken>,
}

impl<D: VisionDriver + ?Sized> ResilientRequestExecutor<D> {
    /// Create an executor around an already constructed driver.
    pub fn new(driver: Arc<D>, policy: RetryPolicy) -> Self {
        Self {
            driver,
            policy,
            cancel: None,
        }
    }

    /// Abort pending attempts and backoff waits when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The shared driver handle.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The retry policy in effect.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Narrate one frame, retrying throttled attempts.
    ///
    /// # Errors
    ///
    /// - The driver's error, unchanged, for any fatal failure
    /// - `RetriesExhausted` once every attempt has been throttled
    /// - `Cancelled` if the cancellation token fires first
    #[instrument(
        skip(self, request),
        fields(
            provider = self.driver.provider_name(),
            model = %self.driver.model_name(),
            max_attempts = *self.policy.max_attempts()
        )
    )]
    pub async fn execute(&self, request: &InferenceRequest) -> ProviderResult<String> {
        let max_attempts = (*self.policy.max_attempts()).max(1);
        let attempts = AtomicU32::new(0);

        let waits = self.policy.planned_waits();

        let retry = Retry::spawn(waits.clone(), || async {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;

            if self.is_cancelled() {
                return Err(RetryError::Permanent(ProviderError::new(
                    ProviderErrorKind::Cancelled,
                )));
            }

            debug!(attempt, "Calling provider");
            match self.driver.describe(request).await {
                Ok(text) => Ok(text),
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    let delay = waits
                        .get((attempt - 1) as usize)
                        .copied()
                        .unwrap_or_default();
                    warn!(
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Rate limit reached, retrying after backoff"
                    );
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) if e.is_retryable() => {
                    error!(
                        attempts = attempt,
                        error = %e,
                        "Exceeded maximum retry attempts"
                    );
                    Err(RetryError::Permanent(ProviderError::new(
                        ProviderErrorKind::RetriesExhausted {
                            attempts: attempt,
                            last: e.kind.to_string(),
                        },
                    )))
                }
                Err(e) => {
                    warn!(attempt, error = %e, "Fatal provider error, failing immediately");
                    Err(RetryError::Permanent(e))
                }
            }
        });

        match &self.cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        warn!("Request cancelled while waiting on provider");
                        Err(ProviderError::new(ProviderErrorKind::Cancelled))
                    }
                    result = retry => result,
                }
            }
            None => retry.await,
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|t| t.is_cancelled())
    }
}
