//! Car inventory lookups over gRPC, with an HTTP/JSON gateway in front.
//!
//! - [`catalog`]: the read-only record store.
//! - [`rpc`]: the backend service, the classifying client wrapper, and the
//!   checkpoint primitive that lets slow calls honour deadlines
//!   (`grpc` feature).
//! - [`gateway`]: HTTP routes that translate into RPC calls (`http` feature).

pub mod catalog;
pub mod config;
mod error;
pub mod telemetry;

#[cfg(feature = "grpc")]
pub mod rpc;

#[cfg(feature = "http")]
pub mod gateway;

pub use catalog::{CarRecord, Catalog, CatalogError, StaticCatalog};
pub use config::{ConfigError, GatewayConfig, ServiceConfig};
pub use error::ServeError;
