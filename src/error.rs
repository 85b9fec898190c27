use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Failure to start or run one of the servers.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[cfg(feature = "grpc")]
    #[error("rpc transport error: {0}")]
    Transport(#[from] tonic::transport::Error),
    #[cfg(feature = "grpc")]
    #[error(transparent)]
    Client(#[from] crate::rpc::ClientError),
}
