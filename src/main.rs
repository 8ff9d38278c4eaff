//! # Nexus Operator
//!
//! Watches Repository, Privilege, Role and ContentSelector resources and keeps
//! the matching Nexus configuration in sync.

use anyhow::Result;
use clap::Parser;
use nexus_operator::config::{ControllerConfig, LogFormat};
use nexus_operator::runtime::{initialization, watch_loop};

/// Nexus Repository Manager operator
#[derive(Debug, Parser)]
#[command(name = "nexus-operator", version, about, long_about = None)]
struct Args {
    /// Port of the metrics and probe server (overrides METRICS_PORT)
    #[arg(long)]
    metrics_port: Option<u16>,

    /// Human-readable logs instead of JSON (overrides LOG_FORMAT)
    #[arg(long)]
    dev: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ControllerConfig::from_env();
    if let Some(port) = args.metrics_port {
        config.metrics_port = port;
    }
    if args.dev {
        config.log_format = LogFormat::Text;
    }
    let concurrency = config.max_concurrent_reconciliations;

    let init = initialization::initialize(config).await?;
    watch_loop::run_watch_loop(
        init.client,
        init.reconcilers,
        init.server_state,
        init.cancellation,
        concurrency,
    )
    .await;

    Ok(())
}
