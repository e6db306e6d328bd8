//! # Donation Commons Node
//!
//! Entry point: parses arguments, installs telemetry, runs the node.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dc_telemetry::{init_telemetry, TelemetryConfig};
use node_runtime::{NodeConfig, NodeRuntime};

/// Donation Commons node: interactions, reports and points over HTTP.
#[derive(Parser, Debug)]
#[command(name = "node-runtime")]
#[command(version, about)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "DC_CONFIG")]
    config: Option<PathBuf>,

    /// Validate the configuration and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _telemetry = init_telemetry(TelemetryConfig::from_env())
        .context("Failed to initialize telemetry")?;

    let mut config = NodeConfig::load(args.config.as_deref())
        .context("Failed to load configuration")?;
    config
        .apply_env()
        .context("Invalid environment override")?;

    if args.check {
        config.validate().context("Invalid configuration")?;
        tracing::info!("Configuration is valid");
        return Ok(());
    }

    let mut runtime = NodeRuntime::new(config).await?;
    runtime.start().await?;
    runtime.run_until_ctrl_c().await?;
    runtime.shutdown().await
}
