//! Tests for the resilient request executor.
//!
//! Backoff waits run on tokio's paused clock, so the full schedule is
//! observed without sleeping in real time.

mod test_utils;

use framewise_error::ProviderErrorKind;
use framewise_retry::{ResilientRequestExecutor, RetryPolicy};
use std::sync::Arc;
use std::time::Duration;
use test_utils::{ScriptedDriver, rate_limited, request, unauthorized};
use tokio_util::sync::CancellationToken;

fn assert_gaps(actual: &[Duration], expected_secs: &[u64]) {
    assert_eq!(actual.len(), expected_secs.len(), "gaps: {:?}", actual);
    for (gap, secs) in actual.iter().zip(expected_secs) {
        let expected = Duration::from_secs(*secs);
        assert!(
            *gap >= expected && *gap < expected + Duration::from_millis(50),
            "expected ~{:?}, got {:?}",
            expected,
            gap
        );
    }
}

#[tokio::test(start_paused = true)]
async fn test_persistent_rate_limit_exhausts_budget() {
    let driver = Arc::new(ScriptedDriver::always(rate_limited()));
    let executor = ResilientRequestExecutor::new(driver.clone(), RetryPolicy::default());

    let err = executor.execute(&request()).await.unwrap_err();

    assert_eq!(driver.call_count(), 5);
    assert!(matches!(
        err.kind,
        ProviderErrorKind::RetriesExhausted { attempts: 5, .. }
    ));
    assert_gaps(&driver.gaps(), &[1, 2, 4, 8]);
}

#[tokio::test(start_paused = true)]
async fn test_authentication_failure_is_not_retried() {
    let driver = Arc::new(ScriptedDriver::always(unauthorized()));
    let executor = ResilientRequestExecutor::new(driver.clone(), RetryPolicy::default());

    let started = tokio::time::Instant::now();
    let err = executor.execute(&request()).await.unwrap_err();

    assert_eq!(driver.call_count(), 1);
    assert!(matches!(err.kind, ProviderErrorKind::AuthenticationFailure(_)));
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_recovers_after_transient_failures() {
    let driver = Arc::new(ScriptedDriver::new(
        vec![rate_limited(), rate_limited()],
        Ok("A person walks into the room.".to_string()),
    ));
    let executor = ResilientRequestExecutor::new(driver.clone(), RetryPolicy::default());

    let text = executor.execute(&request()).await.unwrap();

    assert_eq!(text, "A person walks into the room.");
    assert_eq!(driver.call_count(), 3);
    assert_gaps(&driver.gaps(), &[1, 2]);
}

#[tokio::test(start_paused = true)]
async fn test_fatal_error_after_transient_stops_immediately() {
    let driver = Arc::new(ScriptedDriver::new(vec![rate_limited()], unauthorized()));
    let executor = ResilientRequestExecutor::new(driver.clone(), RetryPolicy::default());

    let err = executor.execute(&request()).await.unwrap_err();

    assert_eq!(driver.call_count(), 2);
    assert!(matches!(err.kind, ProviderErrorKind::AuthenticationFailure(_)));
}

#[tokio::test(start_paused = true)]
async fn test_attempt_budget_is_configurable() {
    let driver = Arc::new(ScriptedDriver::always(rate_limited()));
    let policy = RetryPolicy::builder()
        .max_attempts(3)
        .base_delay_ms(500)
        .build();
    let executor = ResilientRequestExecutor::new(driver.clone(), policy);

    let err = executor.execute(&request()).await.unwrap_err();

    assert_eq!(driver.call_count(), 3);
    assert!(matches!(
        err.kind,
        ProviderErrorKind::RetriesExhausted { attempts: 3, .. }
    ));
    let gaps = driver.gaps();
    assert_eq!(gaps.len(), 2);
    assert!(gaps[0] >= Duration::from_millis(500));
    assert!(gaps[1] >= Duration::from_millis(1000));
}

#[tokio::test(start_paused = true)]
async fn test_single_attempt_budget_never_waits() {
    let driver = Arc::new(ScriptedDriver::always(rate_limited()));
    let policy = RetryPolicy::builder().max_attempts(1).build();
    let executor = ResilientRequestExecutor::new(driver.clone(), policy);

    let started = tokio::time::Instant::now();
    let err = executor.execute(&request()).await.unwrap_err();

    assert_eq!(driver.call_count(), 1);
    assert!(matches!(
        err.kind,
        ProviderErrorKind::RetriesExhausted { attempts: 1, .. }
    ));
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_interrupts_backoff() {
    let driver = Arc::new(ScriptedDriver::always(rate_limited()));
    let token = CancellationToken::new();
    let executor = ResilientRequestExecutor::new(driver.clone(), RetryPolicy::default())
        .with_cancellation(token.clone());

    let canceller = {
        let token = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(2500)).await;
            token.cancel();
        })
    };

    let err = executor.execute(&request()).await.unwrap_err();
    canceller.await.unwrap();

    assert!(matches!(err.kind, ProviderErrorKind::Cancelled));
    // Attempts at t=0s and 1s; cancelled at 2.5s during the 2s wait.
    assert_eq!(driver.call_count(), 2);
}

#[tokio::test]
async fn test_already_cancelled_token_makes_no_calls() {
    let driver = Arc::new(ScriptedDriver::always(Ok("unused".to_string())));
    let token = CancellationToken::new();
    token.cancel();
    let executor = ResilientRequestExecutor::new(driver.clone(), RetryPolicy::default())
        .with_cancellation(token);

    let err = executor.execute(&request()).await.unwrap_err();

    assert!(matches!(err.kind, ProviderErrorKind::Cancelled));
    assert_eq!(driver.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_jittered_waits_stay_near_schedule() {
    let driver = Arc::new(ScriptedDriver::always(rate_limited()));
    let policy = RetryPolicy::builder().jitter(true).build();
    let executor = ResilientRequestExecutor::new(driver.clone(), policy.clone());

    let err = executor.execute(&request()).await.unwrap_err();

    assert!(matches!(
        err.kind,
        ProviderErrorKind::RetriesExhausted { attempts: 5, .. }
    ));
    let gaps = driver.gaps();
    assert_eq!(gaps.len(), 4);
    for (gap, nominal) in gaps.iter().zip(policy.schedule()) {
        assert!(*gap >= nominal / 2, "{:?} below half of {:?}", gap, nominal);
        assert!(
            *gap < nominal * 3 / 2 + Duration::from_millis(50),
            "{:?} above 1.5x {:?}",
            gap,
            nominal
        );
    }
}
