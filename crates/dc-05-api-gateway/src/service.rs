//! API Gateway service - main entry point.
//!
//! Owns the HTTP server lifecycle: bind, serve, graceful shutdown.

use crate::domain::config::GatewayConfig;
use crate::domain::error::GatewayError;
use crate::handlers::AppState;
use crate::middleware::{ResolverChain, SessionResolver};
use crate::router::build_router;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// API Gateway service state
pub struct GatewayService {
    config: GatewayConfig,
    router: Router,
    local_addr: Option<SocketAddr>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    server: Option<JoinHandle<std::io::Result<()>>>,
}

impl GatewayService {
    /// Create a gateway with resolvers built from `config.identity`.
    pub fn new(config: GatewayConfig, state: AppState) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        let resolver = ResolverChain::from_config(&config.identity)
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        Ok(Self::with_resolver(config, state, Arc::new(resolver)))
    }

    /// Create a gateway with an explicit session resolver.
    pub fn with_resolver(
        config: GatewayConfig,
        state: AppState,
        resolver: Arc<dyn SessionResolver>,
    ) -> Self {
        let router = build_router(&config, state, resolver);
        Self {
            config,
            router,
            local_addr: None,
            shutdown_tx: None,
            server: None,
        }
    }

    /// Bind the listener and serve in the background.
    ///
    /// Returns the bound address.
    pub async fn start(&mut self) -> Result<SocketAddr, GatewayError> {
        let addr = self.config.http_addr();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{addr}: {e}")))?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| GatewayError::Bind(e.to_string()))?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let router = self.router.clone();

        info!(addr = %local_addr, "Starting HTTP server");
        let server = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    // A dropped sender also stops the server.
                    let _ = shutdown_rx.await;
                    info!("Received shutdown signal");
                })
                .await
        });

        self.shutdown_tx = Some(shutdown_tx);
        self.server = Some(server);
        self.local_addr = Some(local_addr);
        Ok(local_addr)
    }

    /// Address the server is bound to, once started.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// Resolves when the server stops on its own, i.e. with an error.
    /// Pending forever if the server was never started.
    pub async fn stopped(&mut self) -> Result<(), GatewayError> {
        match self.server.as_mut() {
            Some(handle) => {
                let result = handle.await;
                self.server = None;
                flatten(result)
            }
            None => std::future::pending().await,
        }
    }

    /// Trigger graceful shutdown and wait for in-flight requests.
    pub async fn shutdown(&mut self) -> Result<(), GatewayError> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.server.take() {
            flatten(handle.await)?;
        }
        info!("API Gateway stopped");
        Ok(())
    }
}

fn flatten(
    result: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<(), GatewayError> {
    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => {
            error!(error = %e, "HTTP server error");
            Err(GatewayError::Serve(e.to_string()))
        }
        Err(e) => {
            error!(error = %e, "HTTP server task failed");
            Err(GatewayError::Serve(e.to_string()))
        }
    }
}
