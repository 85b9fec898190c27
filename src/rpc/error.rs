use thiserror::Error;

/// Failure to set up an RPC client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid backend endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: tonic::transport::Error,
    },
}
