//! WebSocket pairing handlers
//!
//! Upgrades the two `/connect/{name}/...` endpoints into persistent frame
//! streams and hands the resulting connections to the lobby registry. The
//! relay core never sees WebSocket types; [`WsConnection`] adapts a socket to
//! the [`Connection`] trait.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::extract::ws::{Message, Utf8Bytes, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::Mutex;

use crate::relay::{Connection, Frame, FrameKind};
use crate::server::AppState;

/// A WebSocket adapted to the relay's [`Connection`] trait
///
/// The socket is split so the broadcast loop can block on reads while a
/// pairing handler sends a close frame to the same connection.
pub struct WsConnection {
    sender: Mutex<SplitSink<WebSocket, Message>>,
    receiver: Mutex<SplitStream<WebSocket>>,
    closed: AtomicBool,
}

impl WsConnection {
    /// Wrap an upgraded socket
    pub fn new(socket: WebSocket) -> Self {
        let (sender, receiver) = socket.split();
        Self {
            sender: Mutex::new(sender),
            receiver: Mutex::new(receiver),
            closed: AtomicBool::new(false),
        }
    }
}

/// Convert a relay frame into a WebSocket message
///
/// The payload stays reference-counted in both directions; only text frames
/// pay for a UTF-8 validation pass.
fn frame_to_message(frame: Frame) -> io::Result<Message> {
    match frame.kind {
        FrameKind::Text => {
            let text = Utf8Bytes::try_from(frame.payload)
                .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
            Ok(Message::Text(text))
        }
        FrameKind::Binary => Ok(Message::Binary(frame.payload)),
    }
}

impl Connection for WsConnection {
    async fn send(&self, frame: Frame) -> io::Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "connection closed"));
        }

        let message = frame_to_message(frame)?;

        self.sender
            .lock()
            .await
            .send(message)
            .await
            .map_err(|err| io::Error::new(io::ErrorKind::BrokenPipe, err))
    }

    async fn receive(&self) -> io::Result<Frame> {
        if self.closed.load(Ordering::Acquire) {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "connection closed"));
        }

        let mut receiver = self.receiver.lock().await;
        loop {
            match receiver.next().await {
                Some(Ok(Message::Text(text))) => {
                    return Ok(Frame::text(Bytes::from(text)));
                }
                Some(Ok(Message::Binary(data))) => {
                    return Ok(Frame::binary(data));
                }
                // Ping/pong are answered by the protocol stack; not relayed.
                Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => continue,
                Some(Ok(Message::Close(_))) | None => {
                    return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "peer closed"));
                }
                Some(Err(err)) => {
                    return Err(io::Error::new(io::ErrorKind::BrokenPipe, err));
                }
            }
        }
    }

    async fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        // Best-effort close frame; the peer may already be gone.
        let _ = self.sender.lock().await.send(Message::Close(None)).await;
    }
}

/// GET /connect/{name}/server — producer WebSocket upgrade
pub async fn producer_ws(
    State(state): State<AppState>,
    Path(name): Path<String>,
    ws: WebSocketUpgrade,
) -> Response {
    if name.trim().is_empty() {
        tracing::warn!("producer pairing rejected: empty lobby name");
        return StatusCode::BAD_REQUEST.into_response();
    }

    tracing::info!(lobby = %name, "producer connecting");

    ws.on_upgrade(move |socket| async move {
        let conn = WsConnection::new(socket);
        if let Err(err) = state.registry.attach_producer(&name, conn).await {
            tracing::error!(lobby = %name, error = %err, "failed to attach producer");
        }
    })
}

/// GET /connect/{name}/client — viewer WebSocket upgrade
pub async fn client_ws(
    State(state): State<AppState>,
    Path(name): Path<String>,
    ws: WebSocketUpgrade,
) -> Response {
    if name.trim().is_empty() {
        tracing::warn!("client pairing rejected: empty lobby name");
        return StatusCode::BAD_REQUEST.into_response();
    }

    tracing::info!(lobby = %name, "client connecting");

    ws.on_upgrade(move |socket| async move {
        let conn = WsConnection::new(socket);
        if let Err(err) = state.registry.attach_client(&name, conn).await {
            tracing::error!(lobby = %name, error = %err, "failed to attach client");
        }
    })
}
