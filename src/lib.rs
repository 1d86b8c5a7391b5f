//! WebSocket log relay server
//!
//! Relays real-time log frames from one upstream producer connection to any
//! number of downstream viewer connections, grouped by lobby name.
//!
//! # Architecture
//!
//! ```text
//!                        Arc<LobbyRegistry>
//!                   ┌──────────────────────────┐
//!                   │ lobbies: HashMap<String, │
//!                   │   Lobby {                │
//!                   │     producer, clients,   │
//!                   │     broadcast loop       │
//!                   │   }                      │
//!                   │ >                        │
//!                   └────────────┬─────────────┘
//!                                │
//!        ┌───────────────────────┼───────────────────────┐
//!        │                       │                       │
//!        ▼                       ▼                       ▼
//!   [Producer]              [Client]                [Client]
//!   /connect/{name}/server  /connect/{name}/client  /connect/{name}/client
//!        │                       ▲                       ▲
//!        └──► lobby.run() ──► send(frame) ──────────────┘
//! ```
//!
//! Each lobby runs one long-lived broadcast loop that reads frames from its
//! producer and fans them out verbatim to every connected client. Producer
//! and client disconnects are recovered in-process: the producer slot is
//! cleared and re-filled on reconnect, failed clients are dropped from the
//! distribution set. Frames are carried as [`bytes::Bytes`], so the fan-out
//! clones are reference-counted rather than copied.

pub mod error;
pub mod relay;
pub mod server;
pub mod store;

pub use error::{Error, Result};
pub use relay::{Connection, Frame, FrameKind, Lobby, LobbyRegistry, RelayConfig, RelayError};
pub use server::{RelayServer, ServerConfig};
