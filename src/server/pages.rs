//! Viewer HTML pages
//!
//! Rendering collaborators for the relay: a home page with a lobby-name form
//! and a per-lobby viewer page that opens the client WebSocket and appends
//! received log lines. They share no state with the core beyond the lobby
//! name used as a correlation key.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::Html;

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// GET / — home page with a form navigating to /lobby/{name}
pub async fn home_page() -> Html<String> {
    Html(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>logrelay</title>
    <style>
        body { font-family: monospace; background: #111; color: #ddd; display: flex; justify-content: center; align-items: center; min-height: 100vh; margin: 0; }
        form { display: flex; gap: 0.5rem; }
        input, button { font: inherit; padding: 0.4rem 0.8rem; background: #222; color: #ddd; border: 1px solid #444; }
    </style>
</head>
<body>
    <form id="lobby-form">
        <input id="lobby-input" placeholder="lobby name" autofocus>
        <button id="submit-button" type="submit">watch</button>
    </form>
    <script>
        document.getElementById("lobby-form").addEventListener("submit", function(event) {
            event.preventDefault();
            const name = document.getElementById("lobby-input").value.trim();
            if (name === "") {
                console.error("Empty lobby name");
                return;
            }
            window.location.href = "/lobby/" + encodeURIComponent(name);
        });
    </script>
</body>
</html>"#
            .to_string(),
    )
}

/// GET /lobby/{name} — viewer page streaming the lobby's frames
///
/// The script derives the lobby name from the URL path, so nothing
/// user-controlled is interpolated into it.
pub async fn lobby_page(Path(name): Path<String>) -> Result<Html<String>, StatusCode> {
    if name.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let escaped_name = html_escape(&name);

    Ok(Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>logrelay — {escaped_name}</title>
    <style>
        body {{ font-family: monospace; background: #111; color: #ddd; margin: 0; }}
        h1 {{ font-size: 1rem; padding: 0.5rem 1rem; border-bottom: 1px solid #333; margin: 0; }}
        #status {{ color: #888; }}
        #logs {{ padding: 1rem; white-space: pre-wrap; word-break: break-all; margin: 0; }}
    </style>
</head>
<body>
    <h1>{escaped_name} <span id="status">connecting…</span></h1>
    <pre id="logs"></pre>
    <script>
        const name = decodeURIComponent(window.location.pathname.split("/").pop());
        const proto = window.location.protocol === "https:" ? "wss:" : "ws:";
        const socket = new WebSocket(proto + "//" + window.location.host + "/connect/" + encodeURIComponent(name) + "/client");
        const status = document.getElementById("status");
        const logs = document.getElementById("logs");

        socket.onopen = function() {{
            status.textContent = "connected";
        }};
        socket.onmessage = function(event) {{
            logs.textContent += event.data + "\n";
            window.scrollTo(0, document.body.scrollHeight);
        }};
        socket.onerror = function(error) {{
            console.error("WebSocket error:", error);
        }};
        socket.onclose = function(event) {{
            status.textContent = "disconnected";
            if (!event.wasClean) {{
                console.error("WebSocket connection died");
            }}
        }};
    </script>
</body>
</html>"#
    )))
}
