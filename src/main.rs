//! Log relay server binary
//!
//! Run with: cargo run [BIND_ADDR]
//!
//! Examples:
//!   cargo run                        # binds to 127.0.0.1:8080
//!   cargo run -- 0.0.0.0:8080        # binds to 0.0.0.0:8080
//!
//! Pipe logs into a lobby with any WebSocket client against
//! `ws://HOST/connect/{lobby}/server`, then watch them at
//! `http://HOST/lobby/{lobby}`.

use std::net::SocketAddr;
use std::path::Path;

use logrelay::{RelayServer, ServerConfig};

/// Parse bind address from command line argument.
///
/// Accepts "localhost", "IP", or "IP:PORT"; the port defaults to 8080.
fn parse_bind_addr(arg: &str) -> Result<SocketAddr, String> {
    const DEFAULT_PORT: u16 = 8080;

    let normalized = arg.replace("localhost", "127.0.0.1");

    if let Ok(addr) = normalized.parse::<SocketAddr>() {
        return Ok(addr);
    }

    if let Ok(ip) = normalized.parse::<std::net::IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_PORT));
    }

    Err(format!(
        "Invalid bind address: '{}'. Expected format: IP:PORT or IP or 'localhost'",
        arg
    ))
}

fn print_usage() {
    eprintln!("Usage: logrelay [BIND_ADDR]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  BIND_ADDR    Address to bind to (default: 127.0.0.1:8080)");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("logrelay=info")),
        )
        .init();

    let mut config = ServerConfig::default();

    if let Some(addr_str) = args.get(1) {
        match parse_bind_addr(addr_str) {
            Ok(addr) => config = config.bind(addr),
            Err(e) => {
                eprintln!("Error: {}", e);
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }

    // Serve ./static if it exists, mirroring the viewer pages' asset layout.
    if Path::new("static").is_dir() {
        config = config.static_dir("static");
    }

    let server = RelayServer::new(config).await?;

    server
        .run_until(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}
