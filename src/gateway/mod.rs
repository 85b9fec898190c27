//! HTTP gateway. Maps HTTP routes to RPC calls on the car service.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /car/{id}`: `Lookup`. Body = `{ "result": { "id", "make", "model" } | null }`.
//! - `GET /cars`: `BulkFetch` with the configured timeout. Body = `{ "result": [...] }`.
//! - anything else: logged, `404`, no body.
//!
//! Failures are `400` with `{ "message": "...", "code": "..." }`.
//!
//! ## Example
//!
//! ```ignore
//! use car_inventory::gateway::{self, GatewayState};
//! use car_inventory::GatewayConfig;
//!
//! // Get the router to compose with other axum routes
//! let app = gateway::router(GatewayState::from_config(&GatewayConfig::default())?);
//!
//! // Or serve directly
//! gateway::serve_gateway(GatewayConfig::default(), shutdown).await?;
//! ```

mod error;
mod handlers;
mod routes;

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::ApiError;
pub use handlers::{BulkBody, LookupBody};
pub use routes::Route;

use crate::config::GatewayConfig;
use crate::error::ServeError;
use crate::rpc::{CarClient, ClientError};

/// Shared by every request: the backend client and the `BulkFetch` budget.
#[derive(Debug, Clone)]
pub struct GatewayState {
    client: CarClient,
    bulk_timeout: Duration,
}

impl GatewayState {
    pub fn new(client: CarClient, bulk_timeout: Duration) -> Self {
        Self {
            client,
            bulk_timeout,
        }
    }

    /// Connect lazily to `config.backend_endpoint`.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, ClientError> {
        let client = CarClient::connect_lazy(config.backend_endpoint.clone())?;
        Ok(Self::new(client, config.bulk_timeout()))
    }

    pub fn client(&self) -> &CarClient {
        &self.client
    }

    pub fn bulk_timeout(&self) -> Duration {
        self.bulk_timeout
    }
}

/// Build the gateway `Router` from [`Route::ALL`].
pub fn router(state: GatewayState) -> Router {
    let mut router = Router::new();
    for route in Route::ALL {
        for path in route.paths() {
            router = router.route(path, route.handler());
        }
    }
    router
        .fallback(handlers::placeholder)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `config.listen_addr` and serve until `shutdown` is cancelled.
///
/// The config is validated before anything is bound.
pub async fn serve_gateway(
    config: GatewayConfig,
    shutdown: CancellationToken,
) -> Result<(), ServeError> {
    config.validate()?;
    let state = GatewayState::from_config(&config)?;
    let addr = config.listen_addr;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })?;
    serve_gateway_with_listener(listener, state, shutdown).await
}

/// Serve on an already bound listener until `shutdown` is cancelled.
pub async fn serve_gateway_with_listener(
    listener: TcpListener,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), ServeError> {
    let local_addr = listener.local_addr()?;
    info!(%local_addr, bulk_timeout = ?state.bulk_timeout(), "car gateway listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!(%local_addr, "car gateway stopped");
    Ok(())
}
