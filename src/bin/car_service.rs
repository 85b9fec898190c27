use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use car_inventory::rpc::{serve_rpc, CarServiceHandler};
use car_inventory::{telemetry, ServiceConfig, StaticCatalog};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "car-service")]
#[command(about = "Car inventory gRPC backend", long_about = None)]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(short, long, env = "CAR_SERVICE_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(short, long, env = "CAR_SERVICE_LISTEN")]
    listen: Option<SocketAddr>,

    /// Number of simulated-work waits in BulkFetch
    #[arg(long)]
    checkpoints: Option<u32>,

    /// Length of each BulkFetch wait in milliseconds
    #[arg(long)]
    checkpoint_interval_ms: Option<u64>,
}

impl Args {
    fn into_config(self) -> Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => ServiceConfig::from_json_file(path)?,
            None => ServiceConfig::default(),
        };
        if let Some(listen) = self.listen {
            config.listen_addr = listen;
        }
        if let Some(checkpoints) = self.checkpoints {
            config.checkpoints = checkpoints;
        }
        if let Some(interval) = self.checkpoint_interval_ms {
            config.checkpoint_interval_ms = interval;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();

    let config = Args::parse().into_config()?;
    info!(?config, "car service starting");

    let catalog = StaticCatalog::builtin().context("failed to load the car catalog")?;
    info!(records = catalog.len(), "catalog loaded");

    let handler = CarServiceHandler::new(catalog).with_checkpoints(config.bulk_checkpoints());

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, shutting down");
        }
        signal.cancel();
    });

    serve_rpc(handler, config.listen_addr, shutdown)
        .await
        .context("car service failed")?;
    Ok(())
}
