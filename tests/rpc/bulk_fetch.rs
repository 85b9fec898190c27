use std::time::{Duration, Instant};

use car_inventory::rpc::{CallOutcome, CarClient, FailureKind};

use crate::support::{
    broken_handler, expected_catalog, fast_handler, start_backend, unreachable_endpoint,
    FAST_CHECKPOINTS, LONG_TIMEOUT, SHORT_TIMEOUT,
};

#[tokio::test]
async fn generous_timeout_returns_whole_catalog_in_order() {
    let backend = start_backend(fast_handler()).await;
    let client = CarClient::connect_lazy(backend.endpoint.clone()).unwrap();

    let outcome = client.call_bulk_fetch(LONG_TIMEOUT).await;
    assert_eq!(outcome, CallOutcome::Success(expected_catalog()));
}

#[tokio::test]
async fn bulk_fetch_takes_the_simulated_work_time() {
    let backend = start_backend(fast_handler()).await;
    let client = CarClient::connect_lazy(backend.endpoint.clone()).unwrap();

    let start = Instant::now();
    assert!(client.call_bulk_fetch(LONG_TIMEOUT).await.is_success());
    assert!(start.elapsed() >= FAST_CHECKPOINTS.total());
}

#[tokio::test]
async fn timeouts_shorter_than_the_work_always_expire() {
    let backend = start_backend(fast_handler()).await;
    let client = CarClient::connect_lazy(backend.endpoint.clone()).unwrap();

    for millis in [1, 50, 150, 250] {
        let outcome = client.call_bulk_fetch(Duration::from_millis(millis)).await;
        assert!(
            outcome.is_deadline_exceeded(),
            "timeout of {millis}ms gave {outcome:?}"
        );
        // Nothing from the backend survives a timeout.
        assert_eq!(outcome.success(), None);
    }
}

#[tokio::test]
async fn expiry_is_reported_promptly() {
    let backend = start_backend(fast_handler()).await;
    let client = CarClient::connect_lazy(backend.endpoint.clone()).unwrap();

    let start = Instant::now();
    assert!(client.call_bulk_fetch(SHORT_TIMEOUT).await.is_deadline_exceeded());
    assert!(start.elapsed() < FAST_CHECKPOINTS.total());
}

#[tokio::test]
async fn backend_keeps_serving_after_a_timeout() {
    let backend = start_backend(fast_handler()).await;
    let client = CarClient::connect_lazy(backend.endpoint.clone()).unwrap();

    assert!(client.call_bulk_fetch(SHORT_TIMEOUT).await.is_deadline_exceeded());
    assert_eq!(
        client.call_bulk_fetch(LONG_TIMEOUT).await,
        CallOutcome::Success(expected_catalog())
    );
}

#[tokio::test]
async fn catalog_failure_after_the_wait_is_rejected() {
    let backend = start_backend(broken_handler()).await;
    let client = CarClient::connect_lazy(backend.endpoint.clone()).unwrap();

    match client.call_bulk_fetch(LONG_TIMEOUT).await {
        CallOutcome::OtherFailure(failure) => assert_eq!(failure.kind, FailureKind::Rejected),
        other => panic!("expected a failure, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_backend_is_unavailable() {
    let client = CarClient::connect_lazy(unreachable_endpoint().await).unwrap();

    match client.call_bulk_fetch(LONG_TIMEOUT).await {
        CallOutcome::OtherFailure(failure) => assert_eq!(failure.kind, FailureKind::Unavailable),
        other => panic!("expected a failure, got {other:?}"),
    }
}

#[tokio::test]
async fn oversized_timeout_is_clamped_to_the_header_limit() {
    let backend = start_backend(fast_handler()).await;
    let client = CarClient::connect_lazy(backend.endpoint.clone()).unwrap();

    let outcome = client.call_bulk_fetch(Duration::MAX).await;
    assert_eq!(outcome, CallOutcome::Success(expected_catalog()));
}
