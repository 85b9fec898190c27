use car_inventory::rpc::{CallOutcome, CarClient};

use crate::support::{expected_catalog, fast_handler, start_backend, LONG_TIMEOUT, SHORT_TIMEOUT};

#[tokio::test]
async fn simultaneous_calls_follow_their_own_deadlines() {
    let backend = start_backend(fast_handler()).await;
    let client = CarClient::connect_lazy(backend.endpoint.clone()).unwrap();

    let (short, long) = tokio::join!(
        client.call_bulk_fetch(SHORT_TIMEOUT),
        client.call_bulk_fetch(LONG_TIMEOUT),
    );

    assert_eq!(short, CallOutcome::DeadlineExceeded);
    assert_eq!(long, CallOutcome::Success(expected_catalog()));
}

#[tokio::test]
async fn lookups_are_not_held_up_by_bulk_fetch() {
    let backend = start_backend(fast_handler()).await;
    let client = CarClient::connect_lazy(backend.endpoint.clone()).unwrap();

    let bulk = {
        let client = client.clone();
        tokio::spawn(async move { client.call_bulk_fetch(LONG_TIMEOUT).await })
    };

    let found = client.call_lookup(5).await.success().unwrap().unwrap();
    assert_eq!(found.model, "Tundra");

    assert_eq!(bulk.await.unwrap(), CallOutcome::Success(expected_catalog()));
}
