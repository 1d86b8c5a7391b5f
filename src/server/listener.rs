//! Relay server
//!
//! Binds the HTTP listener and runs the route table on top of a shared lobby
//! registry. The persistence store is opened during construction and gates
//! startup; the relay itself never touches it.

use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::net::TcpListener;

use crate::error::Result;
use crate::relay::{LobbyRegistry, RelayConfig};
use crate::server::config::ServerConfig;
use crate::server::router::build_router;
use crate::server::ws::WsConnection;
use crate::server::AppState;
use crate::store;

/// WebSocket log relay server
pub struct RelayServer {
    config: ServerConfig,
    registry: Arc<LobbyRegistry<WsConnection>>,
    store: SqlitePool,
}

impl RelayServer {
    /// Create a new server with the given configuration
    ///
    /// Opens the persistence store; failure to open it is fatal.
    pub async fn new(config: ServerConfig) -> Result<Self> {
        Self::with_relay_config(config, RelayConfig::default()).await
    }

    /// Create a new server with custom relay configuration
    pub async fn with_relay_config(config: ServerConfig, relay_config: RelayConfig) -> Result<Self> {
        let store = store::open(&config.store_path).await?;

        Ok(Self {
            config,
            registry: Arc::new(LobbyRegistry::with_config(relay_config)),
            store,
        })
    }

    /// Get a reference to the lobby registry
    pub fn registry(&self) -> &Arc<LobbyRegistry<WsConnection>> {
        &self.registry
    }

    /// Get a reference to the persistence store
    pub fn store(&self) -> &SqlitePool {
        &self.store
    }

    /// Run the server
    ///
    /// This method blocks until the server is shut down.
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(addr = %self.config.bind_addr, "log relay listening");

        // Background eviction of idle lobbies
        let _cleanup_handle = self.registry.spawn_cleanup_task();

        self.serve(listener).await
    }

    /// Run the server with graceful shutdown
    pub async fn run_until<F>(&self, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()>,
    {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(addr = %self.config.bind_addr, "log relay listening");

        let cleanup_handle = self.registry.spawn_cleanup_task();

        let result = tokio::select! {
            _ = shutdown => {
                tracing::info!("shutdown signal received");
                Ok(())
            }
            result = self.serve(listener) => result,
        };

        cleanup_handle.abort();

        result
    }

    async fn serve(&self, listener: TcpListener) -> Result<()> {
        let state = AppState {
            registry: Arc::clone(&self.registry),
        };
        let app = build_router(state, self.config.static_dir.as_deref());

        axum::serve(listener, app).await?;
        Ok(())
    }

    /// Get the bind address
    pub fn bind_addr(&self) -> std::net::SocketAddr {
        self.config.bind_addr
    }
}
