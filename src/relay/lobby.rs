//! Per-lobby state and the broadcast loop
//!
//! A lobby pairs at most one producer connection with an ordered set of
//! client connections. Once both sides are present, a single long-lived task
//! runs [`Lobby::run`], reading frames from the producer and fanning them out
//! to every client.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, Notify};

use super::connection::Connection;

/// Snapshot of a lobby's state, for diagnostics and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbyStats {
    /// Whether a producer is currently attached
    pub has_producer: bool,
    /// Number of attached clients
    pub client_count: usize,
    /// Whether the broadcast loop has been started
    pub started: bool,
}

struct LobbyState<C> {
    producer: Option<Arc<C>>,
    clients: Vec<Arc<C>>,
    started: bool,
    evicted: bool,
    last_active: Instant,
}

/// A named channel pairing one producer to zero-or-more clients
///
/// All mutable state sits behind one lock, but the lock is never held across
/// connection I/O: the broadcast loop snapshots the producer and client list,
/// then reads and writes against the snapshot. Producer attachment is
/// signalled through a [`Notify`] rather than polled.
pub struct Lobby<C> {
    name: String,
    state: Mutex<LobbyState<C>>,
    producer_attached: Notify,
}

impl<C> std::fmt::Debug for Lobby<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lobby")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<C: Connection> Lobby<C> {
    pub(super) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Mutex::new(LobbyState {
                producer: None,
                clients: Vec::new(),
                started: false,
                evicted: false,
                last_active: Instant::now(),
            }),
            producer_attached: Notify::new(),
        }
    }

    /// Lobby name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attach a producer, replacing and closing any previous one
    ///
    /// Replacement is what enables producer-side reconnection: a fresh
    /// connection after a network interruption simply takes the slot over.
    ///
    /// An evicted lobby accepts nothing: the connection is handed back so
    /// the caller can attach it to a fresh lobby under the same name.
    pub async fn add_producer(&self, conn: C) -> Option<C> {
        let old = {
            let mut state = self.state.lock().await;
            if state.evicted {
                return Some(conn);
            }
            let old = state.producer.replace(Arc::new(conn));
            state.last_active = Instant::now();
            old
        };

        if let Some(old) = old {
            tracing::info!(lobby = %self.name, "replacing previous producer");
            old.close().await;
        }

        // Wake the broadcast loop if it is waiting for a producer. The permit
        // is stored if the loop is not waiting yet.
        self.producer_attached.notify_one();

        tracing::info!(lobby = %self.name, "producer attached");
        None
    }

    /// Attach a client
    ///
    /// Clients are kept in insertion order; no deduplication and no upper
    /// bound. Capacity limits are a deployment concern. Hands the connection
    /// back if the lobby has already been evicted.
    pub async fn add_client(&self, conn: C) -> Option<C> {
        let mut state = self.state.lock().await;
        if state.evicted {
            return Some(conn);
        }
        state.clients.push(Arc::new(conn));
        state.last_active = Instant::now();

        tracing::info!(
            lobby = %self.name,
            clients = state.clients.len(),
            "client attached"
        );
        None
    }

    /// Whether the lobby has both a producer and at least one client
    pub async fn is_ready(&self) -> bool {
        let state = self.state.lock().await;
        state.producer.is_some() && !state.clients.is_empty()
    }

    /// Get lobby statistics
    pub async fn stats(&self) -> LobbyStats {
        let state = self.state.lock().await;
        LobbyStats {
            has_producer: state.producer.is_some(),
            client_count: state.clients.len(),
            started: state.started,
        }
    }

    /// Run the broadcast loop
    ///
    /// Idempotent: the first caller flips the `started` flag and runs the
    /// loop; later callers return immediately, so redundant spawns from
    /// concurrent pairing requests are harmless. The loop runs until the
    /// lobby is evicted by the registry's cleanup task.
    pub async fn run(&self) {
        {
            let mut state = self.state.lock().await;
            if state.started {
                return;
            }
            state.started = true;
        }

        tracing::info!(lobby = %self.name, "broadcast loop started");

        loop {
            // Snapshot under the lock; all connection I/O happens outside it.
            let (producer, clients) = {
                let state = self.state.lock().await;
                if state.evicted {
                    break;
                }
                (state.producer.clone(), state.clients.clone())
            };

            let Some(producer) = producer else {
                self.producer_attached.notified().await;
                continue;
            };

            match producer.receive().await {
                Err(err) => {
                    tracing::warn!(
                        lobby = %self.name,
                        error = %err,
                        "failed to read frame from producer"
                    );
                    producer.close().await;

                    // Clear the slot only if it still holds this connection;
                    // a reconnecting producer may have replaced it already.
                    let mut state = self.state.lock().await;
                    if state
                        .producer
                        .as_ref()
                        .is_some_and(|p| Arc::ptr_eq(p, &producer))
                    {
                        state.producer = None;
                    }
                }
                Ok(frame) => {
                    tracing::debug!(
                        lobby = %self.name,
                        clients = clients.len(),
                        bytes = frame.len(),
                        "relaying frame"
                    );

                    // Deliver to the pre-read snapshot, in insertion order.
                    // Clients that joined mid-read get the next frame.
                    let mut failed: Vec<Arc<C>> = Vec::new();
                    for client in &clients {
                        if let Err(err) = client.send(frame.clone()).await {
                            tracing::debug!(
                                lobby = %self.name,
                                error = %err,
                                "failed to write frame to client, dropping it"
                            );
                            client.close().await;
                            failed.push(Arc::clone(client));
                        }
                    }

                    let mut state = self.state.lock().await;
                    if !failed.is_empty() {
                        state
                            .clients
                            .retain(|c| !failed.iter().any(|f| Arc::ptr_eq(c, f)));
                    }
                    state.last_active = Instant::now();
                }
            }
        }

        tracing::info!(lobby = %self.name, "broadcast loop stopped");
    }

    /// Mark the lobby evicted if it has been empty for longer than `idle`
    ///
    /// Returns true if the lobby was evicted. Wakes the broadcast loop so a
    /// task parked waiting for a producer can exit.
    pub(super) async fn evict_if_idle(&self, idle: Duration) -> bool {
        let mut state = self.state.lock().await;
        if state.evicted {
            return false;
        }
        if state.producer.is_none()
            && state.clients.is_empty()
            && state.last_active.elapsed() >= idle
        {
            state.evicted = true;
            drop(state);
            self.producer_attached.notify_one();
            return true;
        }
        false
    }
}
