//! Lobby registry and broadcast engine
//!
//! The core of the relay: lobbies pairing one producer connection to N client
//! connections, the fan-out loop forwarding frames, and the
//! reconnection/cleanup policy around connection failures.
//!
//! # Architecture
//!
//! ```text
//!                      Arc<LobbyRegistry<C>>
//!                 ┌────────────────────────────┐
//!                 │ lobbies: HashMap<String,   │
//!                 │   Arc<Lobby<C>> {          │
//!                 │     producer: Option<C>,   │
//!                 │     clients: Vec<C>,       │
//!                 │   }                        │
//!                 │ >                          │
//!                 └─────────────┬──────────────┘
//!                               │
//!            ┌──────────────────┼──────────────────┐
//!            │                  │                  │
//!            ▼                  ▼                  ▼
//!       [Producer]          [Client]           [Client]
//!       receive()           send(frame)        send(frame)
//!            │                  ▲                  ▲
//!            └───► Lobby::run() ┴──────────────────┘
//! ```
//!
//! The loop never holds the lobby lock across connection I/O: it snapshots
//! the producer and the client list under the lock, reads the next frame
//! outside it, and fans the frame out against the snapshot. Producer
//! attachment wakes a waiting loop through a `Notify` instead of a sleep
//! poll. Lobbies left without producer and clients are evicted after an idle
//! timeout by a background cleanup task.

pub mod config;
pub mod connection;
pub mod error;
pub mod frame;
pub mod lobby;
pub mod registry;

#[cfg(test)]
pub(crate) mod testing;

pub use config::RelayConfig;
pub use connection::Connection;
pub use error::RelayError;
pub use frame::{Frame, FrameKind};
pub use lobby::{Lobby, LobbyStats};
pub use registry::LobbyRegistry;
