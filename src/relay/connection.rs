//! Connection abstraction
//!
//! The relay core is transport-agnostic: it works against any bidirectional
//! frame stream. The server wires this up to WebSocket connections; tests use
//! an in-memory channel-backed implementation.

use std::future::Future;
use std::io;

use super::frame::Frame;

/// A bidirectional message-frame stream
///
/// Methods take `&self`: implementations provide their own interior locking
/// so the broadcast loop can read a producer while a pairing handler closes
/// or replaces it. `close` must be idempotent, since the loop's read-failure
/// handling and a producer takeover may both try to close the same
/// connection.
pub trait Connection: Send + Sync + 'static {
    /// Write one frame to the peer
    fn send(&self, frame: Frame) -> impl Future<Output = io::Result<()>> + Send;

    /// Read one frame from the peer
    ///
    /// Returns an error once the peer has disconnected; this is the sole
    /// disconnect-detection mechanism.
    fn receive(&self) -> impl Future<Output = io::Result<Frame>> + Send;

    /// Best-effort teardown: send a close frame and close the stream
    ///
    /// Never fails; teardown errors are swallowed. Safe to call twice.
    fn close(&self) -> impl Future<Output = ()> + Send;
}
