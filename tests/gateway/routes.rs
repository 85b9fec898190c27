use car_inventory::gateway::{serve_gateway, Route};
use car_inventory::{ConfigError, GatewayConfig, ServeError};
use tokio_util::sync::CancellationToken;

use crate::support::start_default_stack;

#[test]
fn every_route_has_a_path() {
    for route in Route::ALL {
        assert!(!route.paths().is_empty(), "{route:?}");
    }
}

#[tokio::test]
async fn reserved_path_is_a_placeholder() {
    let stack = start_default_stack().await;

    let resp = reqwest::get(format!("{}/car/microservice", stack.base)).await.unwrap();
    assert_eq!(resp.status(), 404);
    assert!(resp.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_paths_fall_through_to_placeholder() {
    let stack = start_default_stack().await;

    for path in ["/", "/trucks", "/car/2/extra"] {
        let resp = reqwest::get(format!("{}{path}", stack.base)).await.unwrap();
        assert_eq!(resp.status(), 404, "path {path}");
    }
}

#[tokio::test]
async fn other_methods_fall_through_to_placeholder() {
    let stack = start_default_stack().await;
    let client = reqwest::Client::new();

    let resp = client.post(format!("{}/cars", stack.base)).send().await.unwrap();
    assert_eq!(resp.status(), 404);

    let resp = client.delete(format!("{}/car/1", stack.base)).send().await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn out_of_range_bulk_timeout_is_refused_before_binding() {
    let config = GatewayConfig {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        bulk_timeout_ms: u64::MAX,
        ..GatewayConfig::default()
    };

    let result = serve_gateway(config, CancellationToken::new()).await;
    assert!(matches!(
        result,
        Err(ServeError::Config(ConfigError::BulkTimeoutOutOfRange(u64::MAX)))
    ));
}
