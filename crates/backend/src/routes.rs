use axum::http::{header, Method};
use axum::{middleware, routing::get, Router};
use contracts::shared::config::ClientConfig;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use crate::handlers;
use crate::system::middleware::request_logger::request_logger;

#[derive(Clone)]
pub struct AppState {
    pub client_config: Arc<ClientConfig>,
}

/// API routes plus the frontend bundle; unknown paths get `index.html`
/// so client-side routes survive a reload.
pub fn configure_routes(state: AppState, dist_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let spa = ServeDir::new(dist_dir).fallback(ServeFile::new(dist_dir.join("index.html")));

    Router::new()
        .route("/health", get(handlers::config::health))
        .route("/api/config", get(handlers::config::get_client_config))
        .with_state(state)
        .fallback_service(spa)
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
}
