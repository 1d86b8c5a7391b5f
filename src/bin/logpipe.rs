//! Pipe stdin into a lobby
//!
//! Connects to a relay server as the producer for a lobby and forwards every
//! line read from stdin as one text frame.
//!
//! Run with: logpipe LOBBY [SERVER_URL]
//!
//! Examples:
//!   some_command 2>&1 | logpipe deploy
//!   tail -f app.log | logpipe app ws://relay.example.com:8080

use futures_util::{SinkExt, StreamExt};
use tokio::io::AsyncBufReadExt;
use tokio_tungstenite::tungstenite::Message;

const DEFAULT_SERVER: &str = "ws://127.0.0.1:8080";

fn print_usage() {
    eprintln!("Usage: logpipe LOBBY [SERVER_URL]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  LOBBY         Lobby name to stream into");
    eprintln!("  SERVER_URL    Relay server base URL (default: {})", DEFAULT_SERVER);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    let Some(lobby) = args.get(1).filter(|name| !name.trim().is_empty()) else {
        eprintln!("Error: lobby name is required");
        eprintln!();
        print_usage();
        std::process::exit(1);
    };

    let server = args
        .get(2)
        .map(String::as_str)
        .unwrap_or(DEFAULT_SERVER)
        .trim_end_matches('/');

    let url = format!("{}/connect/{}/server", server, lobby);
    let (ws_stream, _response) = tokio_tungstenite::connect_async(url.clone()).await?;
    eprintln!("connected to {}", url);

    let (mut writer, mut reader) = ws_stream.split();

    // Drain server frames so close handshakes and pings are processed.
    tokio::spawn(async move { while reader.next().await.is_some() {} });

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await? {
        writer.send(Message::Text(line.into())).await?;
    }

    // stdin closed; tell the server we are done.
    let _ = writer.send(Message::Close(None)).await;

    Ok(())
}
