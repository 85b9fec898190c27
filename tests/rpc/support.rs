//! Shared fixtures: a fast backend, a broken catalog, and server startup.

use std::time::Duration;

use car_inventory::rpc::{serve_rpc_with_listener, CarServiceHandler, Checkpoints};
use car_inventory::{CarRecord, Catalog, CatalogError, StaticCatalog};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Three waits of 100ms: BulkFetch takes 300ms end to end.
pub const FAST_CHECKPOINTS: Checkpoints = Checkpoints::new(3, Duration::from_millis(100));

/// Comfortably longer than `FAST_CHECKPOINTS.total()`.
pub const LONG_TIMEOUT: Duration = Duration::from_secs(3);

/// Well inside the first wait.
pub const SHORT_TIMEOUT: Duration = Duration::from_millis(50);

pub struct BrokenCatalog;

impl Catalog for BrokenCatalog {
    fn fetch_all(&self) -> Result<Vec<CarRecord>, CatalogError> {
        Err(CatalogError::DataUnavailable("fixture refuses to decode".into()))
    }
}

pub fn fast_handler() -> CarServiceHandler<StaticCatalog> {
    CarServiceHandler::new(StaticCatalog::builtin().unwrap()).with_checkpoints(FAST_CHECKPOINTS)
}

pub fn broken_handler() -> CarServiceHandler<BrokenCatalog> {
    CarServiceHandler::new(BrokenCatalog).with_checkpoints(FAST_CHECKPOINTS)
}

/// A running backend. Dropping it shuts the server down.
pub struct Backend {
    pub endpoint: String,
    shutdown: CancellationToken,
}

impl Drop for Backend {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Bind to port 0 and spawn the gRPC server.
pub async fn start_backend<C: Catalog>(handler: CarServiceHandler<C>) -> Backend {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = CancellationToken::new();

    tokio::spawn(serve_rpc_with_listener(handler, listener, shutdown.clone()));

    Backend {
        endpoint: format!("http://{addr}"),
        shutdown,
    }
}

/// An endpoint nothing is listening on.
pub async fn unreachable_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn expected_catalog() -> Vec<CarRecord> {
    vec![
        CarRecord::new(1, "Ford", "F10"),
        CarRecord::new(2, "Toyota", "Camry"),
        CarRecord::new(3, "Toyota", "Rav4"),
        CarRecord::new(4, "Ford", "Bronco"),
        CarRecord::new(5, "Toyota", "Tundra"),
        CarRecord::new(6, "Honda", "Fit"),
    ]
}
