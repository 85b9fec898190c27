//! RPC service and client-wrapper integration tests.
//!
//! Starts a tonic server on an ephemeral port and exercises it through the
//! generated client and the `CarClient` wrapper.

#![cfg(feature = "grpc")]

mod support;
mod bulk_fetch;
mod concurrency;
