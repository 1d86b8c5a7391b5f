//! Lobby registry
//!
//! Process-wide mapping from lobby name to lobby, plus the pairing entry
//! points used by the connection handlers. The registry is an injected
//! service rather than a process-global, so every test can run against its
//! own instance.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::config::RelayConfig;
use super::connection::Connection;
use super::error::RelayError;
use super::lobby::Lobby;

/// Registry of all lobbies
///
/// The map lock is distinct from each lobby's own lock and its critical
/// sections only look up or insert; no connection I/O happens under it.
pub struct LobbyRegistry<C> {
    lobbies: RwLock<HashMap<String, Arc<Lobby<C>>>>,
    config: RelayConfig,
}

impl<C: Connection> LobbyRegistry<C> {
    /// Create a registry with default configuration
    pub fn new() -> Self {
        Self::with_config(RelayConfig::default())
    }

    /// Create a registry with custom configuration
    pub fn with_config(config: RelayConfig) -> Self {
        Self {
            lobbies: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Get the registry configuration
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Return the lobby for `name`, creating it if absent
    ///
    /// Fails on an empty (or whitespace-only) name without creating an
    /// entry.
    pub async fn get_or_create(&self, name: &str) -> Result<Arc<Lobby<C>>, RelayError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RelayError::EmptyLobbyName);
        }

        let mut lobbies = self.lobbies.write().await;
        if let Some(lobby) = lobbies.get(name) {
            return Ok(Arc::clone(lobby));
        }

        let lobby = Arc::new(Lobby::new(name));
        lobbies.insert(name.to_string(), Arc::clone(&lobby));
        tracing::info!(lobby = %name, "lobby created");
        Ok(lobby)
    }

    /// Look up an existing lobby
    pub async fn lookup(&self, name: &str) -> Option<Arc<Lobby<C>>> {
        self.lobbies.read().await.get(name.trim()).cloned()
    }

    /// Number of lobbies currently registered
    pub async fn lobby_count(&self) -> usize {
        self.lobbies.read().await.len()
    }

    /// Pairing entry point for a producer connection
    ///
    /// Resolves or creates the lobby, installs the producer (closing any
    /// previous one), and launches the broadcast loop once the lobby is
    /// ready. A cleanup sweep can evict the lobby between the lookup and
    /// the attach; the lobby hands the connection back in that case and the
    /// lookup is retried, landing on a fresh lobby.
    pub async fn attach_producer(&self, name: &str, mut conn: C) -> Result<Arc<Lobby<C>>, RelayError> {
        loop {
            let lobby = self.get_or_create(name).await?;
            match lobby.add_producer(conn).await {
                None => {
                    self.start_if_ready(&lobby);
                    return Ok(lobby);
                }
                Some(returned) => {
                    tracing::debug!(lobby = %lobby.name(), "lobby evicted during pairing, retrying");
                    conn = returned;
                }
            }
        }
    }

    /// Pairing entry point for a client connection
    pub async fn attach_client(&self, name: &str, mut conn: C) -> Result<Arc<Lobby<C>>, RelayError> {
        loop {
            let lobby = self.get_or_create(name).await?;
            match lobby.add_client(conn).await {
                None => {
                    self.start_if_ready(&lobby);
                    return Ok(lobby);
                }
                Some(returned) => {
                    tracing::debug!(lobby = %lobby.name(), "lobby evicted during pairing, retrying");
                    conn = returned;
                }
            }
        }
    }

    fn start_if_ready(&self, lobby: &Arc<Lobby<C>>) {
        let lobby = Arc::clone(lobby);
        // Redundant spawns are harmless: Lobby::run is idempotent and extra
        // tasks return immediately.
        tokio::spawn(async move {
            if lobby.is_ready().await {
                lobby.run().await;
            }
        });
    }

    /// Run one cleanup sweep
    ///
    /// Removes lobbies that have had no producer and no clients for longer
    /// than `idle_lobby_timeout`, stopping their broadcast loops.
    pub async fn cleanup(&self) {
        let mut lobbies = self.lobbies.write().await;
        let idle = self.config.idle_lobby_timeout;

        let mut evicted = Vec::new();
        for (name, lobby) in lobbies.iter() {
            if lobby.evict_if_idle(idle).await {
                evicted.push(name.clone());
            }
        }

        for name in evicted {
            lobbies.remove(&name);
            tracing::info!(lobby = %name, "idle lobby evicted");
        }
    }

    /// Spawn the background cleanup task
    ///
    /// Returns a handle that can be used to abort the task.
    pub fn spawn_cleanup_task(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let registry = Arc::clone(self);
        let interval = registry.config.cleanup_interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                registry.cleanup().await;
            }
        })
    }
}

impl<C: Connection> Default for LobbyRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}
