//! End-to-end relay tests over real WebSocket connections

use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use logrelay::server::router::build_router;
use logrelay::server::{AppState, WsConnection};
use logrelay::LobbyRegistry;

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

type WsClient = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Start the relay on an ephemeral port; returns the ws base URL and the
/// registry for observing lobby state.
async fn start_server() -> (String, Arc<LobbyRegistry<WsConnection>>) {
    let registry = Arc::new(LobbyRegistry::new());
    let state = AppState {
        registry: Arc::clone(&registry),
    };
    let app = build_router(state, None);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("ws://{}", addr), registry)
}

async fn connect(base: &str, lobby: &str, role: &str) -> WsClient {
    let url = format!("{}/connect/{}/{}", base, lobby, role);
    let (stream, _response) = connect_async(url).await.expect("upgrade failed");
    stream
}

/// Poll lobby stats until the condition holds.
async fn wait_for_lobby<F>(
    registry: &Arc<LobbyRegistry<WsConnection>>,
    lobby: &str,
    mut check: F,
) where
    F: FnMut(&logrelay::relay::LobbyStats) -> bool,
{
    let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
    loop {
        if let Some(lobby) = registry.lookup(lobby).await {
            if check(&lobby.stats().await) {
                return;
            }
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "lobby did not reach expected state"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

async fn next_text(client: &mut WsClient) -> String {
    loop {
        let message = timeout(RECV_TIMEOUT, client.next())
            .await
            .expect("timed out waiting for frame")
            .expect("stream ended")
            .expect("websocket error");
        match message {
            Message::Text(text) => return text.to_string(),
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("unexpected message: {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_fan_out_to_multiple_viewers() {
    let (base, registry) = start_server().await;

    // Viewers join before the producer.
    let mut viewer1 = connect(&base, "room1", "client").await;
    let mut viewer2 = connect(&base, "room1", "client").await;
    wait_for_lobby(&registry, "room1", |stats| stats.client_count == 2).await;

    let mut producer = connect(&base, "room1", "server").await;
    wait_for_lobby(&registry, "room1", |stats| stats.has_producer).await;

    producer.send(Message::Text("hello".into())).await.unwrap();

    assert_eq!(next_text(&mut viewer1).await, "hello");
    assert_eq!(next_text(&mut viewer2).await, "hello");

    producer.send(Message::Text("world".into())).await.unwrap();

    assert_eq!(next_text(&mut viewer1).await, "world");
    assert_eq!(next_text(&mut viewer2).await, "world");
}

#[tokio::test]
async fn test_producer_reconnect_resumes_streaming() {
    let (base, registry) = start_server().await;

    let mut viewer = connect(&base, "deploy", "client").await;
    wait_for_lobby(&registry, "deploy", |stats| stats.client_count == 1).await;

    let mut producer = connect(&base, "deploy", "server").await;
    wait_for_lobby(&registry, "deploy", |stats| stats.has_producer).await;

    producer.send(Message::Text("before".into())).await.unwrap();
    assert_eq!(next_text(&mut viewer).await, "before");

    // Producer drops; the lobby keeps its viewer and waits for a new one.
    producer.close(None).await.unwrap();
    drop(producer);
    wait_for_lobby(&registry, "deploy", |stats| !stats.has_producer).await;

    let mut replacement = connect(&base, "deploy", "server").await;
    wait_for_lobby(&registry, "deploy", |stats| stats.has_producer).await;

    replacement
        .send(Message::Text("after".into()))
        .await
        .unwrap();
    assert_eq!(next_text(&mut viewer).await, "after");
}

#[tokio::test]
async fn test_blank_lobby_name_is_rejected() {
    let (base, registry) = start_server().await;

    // "%20" decodes to a whitespace-only name.
    let url = format!("{}/connect/%20/server", base);
    let result = connect_async(url).await;
    assert!(result.is_err(), "upgrade with blank lobby name must fail");

    assert_eq!(registry.lobby_count().await, 0);
}

#[tokio::test]
async fn test_viewer_disconnect_leaves_others_streaming() {
    let (base, registry) = start_server().await;

    let mut viewer1 = connect(&base, "room2", "client").await;
    let mut viewer2 = connect(&base, "room2", "client").await;
    wait_for_lobby(&registry, "room2", |stats| stats.client_count == 2).await;

    let mut producer = connect(&base, "room2", "server").await;
    wait_for_lobby(&registry, "room2", |stats| stats.has_producer).await;

    producer.send(Message::Text("ping".into())).await.unwrap();
    assert_eq!(next_text(&mut viewer1).await, "ping");
    assert_eq!(next_text(&mut viewer2).await, "ping");

    // First viewer goes away; its write will fail and it gets dropped.
    viewer1.close(None).await.unwrap();
    drop(viewer1);

    producer.send(Message::Text("pong".into())).await.unwrap();
    assert_eq!(next_text(&mut viewer2).await, "pong");
}
