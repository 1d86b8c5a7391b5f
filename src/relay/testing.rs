//! In-memory channel-backed connection for tests

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};

use super::connection::Connection;
use super::frame::Frame;

/// Connection half handed to the relay under test
pub(crate) struct TestConnection {
    inbox: Mutex<mpsc::UnboundedReceiver<Frame>>,
    outbox: mpsc::UnboundedSender<Frame>,
    closed: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

/// Test-side handle simulating the remote peer
pub(crate) struct TestPeer {
    feed: std::sync::Mutex<Option<mpsc::UnboundedSender<Frame>>>,
    delivered: mpsc::UnboundedReceiver<Frame>,
    closed: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

/// Create a connection plus the peer handle controlling it
pub(crate) fn test_connection() -> (TestConnection, TestPeer) {
    let (feed_tx, feed_rx) = mpsc::unbounded_channel();
    let (delivered_tx, delivered_rx) = mpsc::unbounded_channel();
    let closed = Arc::new(AtomicBool::new(false));
    let fail_writes = Arc::new(AtomicBool::new(false));

    let conn = TestConnection {
        inbox: Mutex::new(feed_rx),
        outbox: delivered_tx,
        closed: Arc::clone(&closed),
        fail_writes: Arc::clone(&fail_writes),
    };
    let peer = TestPeer {
        feed: std::sync::Mutex::new(Some(feed_tx)),
        delivered: delivered_rx,
        closed,
        fail_writes,
    };
    (conn, peer)
}

impl TestPeer {
    /// Queue a frame for the relay to read from this connection
    pub fn feed(&self, frame: Frame) {
        if let Some(tx) = self.feed.lock().expect("feed lock poisoned").as_ref() {
            let _ = tx.send(frame);
        }
    }

    /// Simulate the peer going away: subsequent reads fail
    pub fn disconnect(&self) {
        self.feed.lock().expect("feed lock poisoned").take();
    }

    /// Next frame the relay wrote to this connection
    pub async fn delivered(&mut self) -> Option<Frame> {
        self.delivered.recv().await
    }

    /// Whether the relay closed this connection
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Make all subsequent writes to this connection fail
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::Release);
    }
}

impl Connection for TestConnection {
    async fn send(&self, frame: Frame) -> io::Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "connection closed"));
        }
        if self.fail_writes.load(Ordering::Acquire) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "simulated write failure"));
        }
        self.outbox
            .send(frame)
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "peer receiver dropped"))
    }

    async fn receive(&self) -> io::Result<Frame> {
        if self.closed.load(Ordering::Acquire) {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "connection closed"));
        }
        self.inbox
            .lock()
            .await
            .recv()
            .await
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "peer disconnected"))
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}
