//! # Donation Commons Node Runtime
//!
//! Library half of the `node-runtime` binary, exposed for tests.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults → TOML file → `DC_*` environment)
//! 2. Validate (ports, limits, session resolver, ledger policy, backend)
//! 3. Open the store and seed items
//! 4. Wire engines into the gateway and bind the listener
//! 5. Spawn report limiter housekeeping
//! 6. Run until Ctrl-C, then drain in-flight requests

pub mod container;

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use dc_05_api_gateway::GatewayService;
use tokio::sync::watch;
use tracing::{info, warn};

pub use container::{ConfigError, NodeConfig, ServiceContainer, StoreBackend};

/// How often idle rate limiter buckets are dropped.
const MAINTENANCE_INTERVAL: Duration = Duration::from_secs(60);

/// The node: gateway plus background tasks.
pub struct NodeRuntime {
    container: ServiceContainer,
    gateway: GatewayService,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl NodeRuntime {
    /// Validates `config`, opens the store and builds the gateway.
    pub async fn new(config: NodeConfig) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        let container = ServiceContainer::build(&config).await?;
        let gateway = GatewayService::new(config.gateway(), container.state.clone())
            .context("Failed to build API gateway")?;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Ok(Self {
            container,
            gateway,
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Binds the listener and starts background tasks.
    pub async fn start(&mut self) -> Result<SocketAddr> {
        info!("===========================================");
        info!("  Donation Commons Node v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        let addr = self.gateway.start().await?;
        self.spawn_maintenance();

        info!(
            addr = %addr,
            store = ?self.container.backend,
            seeded_items = self.container.seeded_items,
            "Node is running"
        );
        Ok(addr)
    }

    fn spawn_maintenance(&self) {
        let maintenance = self.container.maintenance();
        let mut shutdown = self.shutdown_rx.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(MAINTENANCE_INTERVAL);
            loop {
                tokio::select! {
                    _ = ticker.tick() => maintenance.run_maintenance(),
                    _ = shutdown.changed() => {
                        info!("Maintenance task stopping");
                        break;
                    }
                }
            }
        });
    }

    /// Runs until Ctrl-C or until the server stops on its own.
    pub async fn run_until_ctrl_c(&mut self) -> Result<()> {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl-C")?;
                info!("Received Ctrl-C");
            }
            stopped = self.gateway.stopped() => {
                warn!("HTTP server stopped unexpectedly");
                stopped?;
            }
        }
        Ok(())
    }

    /// Stops background tasks and drains the gateway.
    pub async fn shutdown(&mut self) -> Result<()> {
        info!("Initiating graceful shutdown...");
        // Receivers may already be gone.
        let _ = self.shutdown_tx.send(true);
        self.gateway.shutdown().await?;
        info!("Shutdown complete");
        Ok(())
    }

    pub fn container(&self) -> &ServiceContainer {
        &self.container
    }
}
