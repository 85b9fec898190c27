//! gRPC transport for the car inventory: the service, client wrapper, and the
//! cancellation primitives they share.
//!
//! Requires the `grpc` feature. Uses tonic for the server and client and
//! prost for message serialization (standard protobuf wire format, no
//! `.proto` file).
//!
//! ## RPCs
//!
//! - `Lookup`: point lookup by id. Input = `LookupRequest`, output = `LookupResponse`.
//! - `BulkFetch`: the whole catalog, after simulated work that honours the
//!   caller's deadline. Input = `BulkRequest`, output = `BulkResponse`.
//!
//! ## Example
//!
//! ```ignore
//! use std::time::Duration;
//! use car_inventory::catalog::StaticCatalog;
//! use car_inventory::rpc::{self, CarClient, CarServiceHandler};
//!
//! let handler = CarServiceHandler::new(StaticCatalog::builtin()?);
//! tokio::spawn(rpc::serve_rpc(handler, "0.0.0.0:50051".parse()?, shutdown));
//!
//! let client = CarClient::connect_lazy("http://localhost:50051")?;
//! match client.call_bulk_fetch(Duration::from_secs(4)).await {
//!     rpc::CallOutcome::Success(cars) => println!("{} cars", cars.len()),
//!     rpc::CallOutcome::DeadlineExceeded => println!("too slow"),
//!     rpc::CallOutcome::OtherFailure(failure) => println!("{failure}"),
//! }
//! ```

mod checkpoint;
mod client;
mod context;
mod error;
pub mod messages;
mod service;
mod timeout;

pub use checkpoint::Checkpoints;
pub use client::{CallFailure, CallOutcome, CarClient, FailureKind};
pub use context::{CallContext, Interruption};
pub use error::ClientError;
pub use service::{rpc_server, serve_rpc, serve_rpc_with_listener, CarServiceHandler};
pub use timeout::MAX_GRPC_TIMEOUT;

// ---------------------------------------------------------------------------
// Generated service trait + server/client
// ---------------------------------------------------------------------------

include!(concat!(env!("OUT_DIR"), "/cars.inventory.CarService.rs"));

pub use car_service_client::CarServiceClient;
pub use car_service_server::{CarService, CarServiceServer};
