use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use car_inventory::gateway::serve_gateway;
use car_inventory::{telemetry, GatewayConfig};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "car-gateway")]
#[command(about = "HTTP/JSON gateway for the car inventory service", long_about = None)]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(short, long, env = "CAR_GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(short, long, env = "CAR_GATEWAY_LISTEN")]
    listen: Option<SocketAddr>,

    /// Car service endpoint
    #[arg(short, long, env = "CAR_GATEWAY_BACKEND")]
    backend: Option<String>,

    /// Deadline for GET /cars in milliseconds
    #[arg(long)]
    bulk_timeout_ms: Option<u64>,
}

impl Args {
    fn into_config(self) -> Result<GatewayConfig> {
        let mut config = match &self.config {
            Some(path) => GatewayConfig::from_json_file(path)?,
            None => GatewayConfig::default(),
        };
        if let Some(listen) = self.listen {
            config.listen_addr = listen;
        }
        if let Some(backend) = self.backend {
            config.backend_endpoint = backend;
        }
        if let Some(timeout) = self.bulk_timeout_ms {
            config.bulk_timeout_ms = timeout;
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();

    let config = Args::parse().into_config()?;
    info!(?config, "car gateway starting");

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, shutting down");
        }
        signal.cancel();
    });

    serve_gateway(config, shutdown)
        .await
        .context("car gateway failed")?;
    Ok(())
}
