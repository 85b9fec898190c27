//! Process configuration for the backend service and the gateway.
//!
//! Both structs deserialize from JSON with every field optional; missing
//! fields take the fixed defaults (RPC on 50051, HTTP on 8080).

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_RPC_PORT: u16 = 50051;
pub const DEFAULT_HTTP_PORT: u16 = 8080;
pub const DEFAULT_BACKEND_ENDPOINT: &str = "http://localhost:50051";
pub const DEFAULT_BULK_TIMEOUT: Duration = Duration::from_secs(4);
/// Largest `bulk_timeout_ms` accepted: 99999999 hours, the most a
/// `grpc-timeout` header can express.
pub const MAX_BULK_TIMEOUT_MS: u64 = 99_999_999 * 60 * 60 * 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("bulk_timeout_ms {0} exceeds the maximum of {MAX_BULK_TIMEOUT_MS}")]
    BulkTimeoutOutOfRange(u64),
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Settings for the RPC backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub listen_addr: SocketAddr,
    /// Number of simulated-work waits in `BulkFetch`.
    pub checkpoints: u32,
    pub checkpoint_interval_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, DEFAULT_RPC_PORT)),
            checkpoints: 3,
            checkpoint_interval_ms: 1000,
        }
    }
}

impl ServiceConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        read_json(path.as_ref())
    }

    pub fn checkpoint_interval(&self) -> Duration {
        Duration::from_millis(self.checkpoint_interval_ms)
    }

    #[cfg(feature = "grpc")]
    pub fn bulk_checkpoints(&self) -> crate::rpc::Checkpoints {
        crate::rpc::Checkpoints::new(self.checkpoints, self.checkpoint_interval())
    }
}

/// Settings for the HTTP gateway.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub listen_addr: SocketAddr,
    /// URI of the RPC backend, e.g. `http://localhost:50051`.
    pub backend_endpoint: String,
    /// Deadline given to every `BulkFetch` call behind `GET /cars`.
    pub bulk_timeout_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, DEFAULT_HTTP_PORT)),
            backend_endpoint: DEFAULT_BACKEND_ENDPOINT.to_string(),
            bulk_timeout_ms: DEFAULT_BULK_TIMEOUT.as_millis() as u64,
        }
    }
}

impl GatewayConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = read_json(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bulk_timeout_ms > MAX_BULK_TIMEOUT_MS {
            return Err(ConfigError::BulkTimeoutOutOfRange(self.bulk_timeout_ms));
        }
        Ok(())
    }

    pub fn bulk_timeout(&self) -> Duration {
        Duration::from_millis(self.bulk_timeout_ms)
    }
}
