//! HTTP/WebSocket server boundary
//!
//! Routes, WebSocket upgrade handlers, viewer pages, and the listener tying
//! them to the relay core.

pub mod config;
pub mod listener;
pub mod pages;
pub mod router;
pub mod ws;

use std::sync::Arc;

use crate::relay::LobbyRegistry;

pub use config::ServerConfig;
pub use listener::RelayServer;
pub use ws::WsConnection;

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    /// The lobby registry pairing producers to clients
    pub registry: Arc<LobbyRegistry<WsConnection>>,
}
