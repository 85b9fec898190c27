//! The backend RPC service: point lookups and a deadline-aware bulk fetch
//! against a [`Catalog`].

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::time::Instant;
use tokio_stream::wrappers::TcpListenerStream;
use tokio_util::sync::CancellationToken;
use tonic::{Request, Response, Status};
use tracing::{debug, error, info, warn};

use super::checkpoint::Checkpoints;
use super::context::CallContext;
use super::messages::{BulkRequest, BulkResponse, Car, LookupRequest, LookupResponse};
use super::{CarService, CarServiceServer};
use crate::catalog::{Catalog, CatalogError};
use crate::error::ServeError;

const CANCELLED_MESSAGE: &str = "client cancelled the request (timeout)";

/// Implements the generated `CarService` trait over any catalog.
///
/// Stateless per call: every request builds its own [`CallContext`], and the
/// catalog is only ever read.
pub struct CarServiceHandler<C> {
    catalog: C,
    checkpoints: Checkpoints,
    shutdown: CancellationToken,
}

impl<C: Catalog> CarServiceHandler<C> {
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            checkpoints: Checkpoints::default(),
            shutdown: CancellationToken::new(),
        }
    }

    /// Replace the simulated work `BulkFetch` performs before answering.
    pub fn with_checkpoints(mut self, checkpoints: Checkpoints) -> Self {
        self.checkpoints = checkpoints;
        self
    }

    /// Cancelling `token` interrupts every in-flight `BulkFetch`.
    ///
    /// [`serve_rpc`] and [`serve_rpc_with_listener`] install their own
    /// shutdown token here.
    pub fn with_shutdown(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }
}

#[tonic::async_trait]
impl<C: Catalog> CarService for CarServiceHandler<C> {
    async fn lookup(
        &self,
        request: Request<LookupRequest>,
    ) -> Result<Response<LookupResponse>, Status> {
        let req = request.into_inner();
        info!(id = req.id, candidate = ?req.candidate, "lookup invoked");

        // Zero is a literal key unless a candidate record is supplied.
        let found = match &req.candidate {
            Some(candidate) if req.id == 0 => self
                .catalog
                .fetch_by_model(&candidate.make, &candidate.model),
            _ => self.catalog.fetch_by_id(req.id),
        }
        .map_err(catalog_status)?;

        debug!(id = req.id, matched = found.is_some(), "lookup finished");
        Ok(Response::new(LookupResponse {
            result: found.map(Car::from),
        }))
    }

    async fn bulk_fetch(
        &self,
        request: Request<BulkRequest>,
    ) -> Result<Response<BulkResponse>, Status> {
        let ctx = CallContext::from_metadata(request.metadata(), &self.shutdown);
        let req = request.into_inner();
        let budget = ctx
            .deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()));
        info!(id = req.id, ?budget, "bulk fetch invoked");

        if let Err(reason) = self.checkpoints.run(&ctx).await {
            warn!(?reason, "{}", CANCELLED_MESSAGE);
            return Err(Status::deadline_exceeded(CANCELLED_MESSAGE));
        }

        let cars = self.catalog.fetch_all().map_err(catalog_status)?;
        debug!(count = cars.len(), "bulk fetch finished");
        Ok(Response::new(BulkResponse {
            result: cars.into_iter().map(Car::from).collect(),
        }))
    }
}

fn catalog_status(err: CatalogError) -> Status {
    error!(error = %err, "catalog read failed");
    Status::internal(err.to_string())
}

/// Create a `CarServiceServer` to compose with other tonic routes.
pub fn rpc_server<C: Catalog>(handler: CarServiceHandler<C>) -> CarServiceServer<CarServiceHandler<C>> {
    CarServiceServer::new(handler)
}

/// Bind `addr` and serve until `shutdown` is cancelled.
pub async fn serve_rpc<C: Catalog>(
    handler: CarServiceHandler<C>,
    addr: SocketAddr,
    shutdown: CancellationToken,
) -> Result<(), ServeError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })?;
    serve_rpc_with_listener(handler, listener, shutdown).await
}

/// Serve on an already bound listener until `shutdown` is cancelled.
pub async fn serve_rpc_with_listener<C: Catalog>(
    handler: CarServiceHandler<C>,
    listener: TcpListener,
    shutdown: CancellationToken,
) -> Result<(), ServeError> {
    let local_addr = listener.local_addr().map_err(ServeError::Io)?;
    info!(%local_addr, "car service listening");

    let handler = handler.with_shutdown(shutdown.clone());
    tonic::transport::Server::builder()
        .add_service(rpc_server(handler))
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), async move {
            shutdown.cancelled().await;
        })
        .await?;

    info!(%local_addr, "car service stopped");
    Ok(())
}
