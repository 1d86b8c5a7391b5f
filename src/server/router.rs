//! HTTP route table

use std::path::Path;

use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;

use crate::server::{pages, ws, AppState};

/// Build the axum Router with all routes
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let mut router = Router::new()
        .route("/", get(pages::home_page))
        .route("/lobby/{name}", get(pages::lobby_page))
        .route("/connect/{name}/client", get(ws::client_ws))
        .route("/connect/{name}/server", get(ws::producer_ws));

    if let Some(dir) = static_dir {
        router = router.nest_service("/static", ServeDir::new(dir));
    }

    router.with_state(state)
}
