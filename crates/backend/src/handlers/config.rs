use axum::extract::State;
use axum::Json;
use contracts::shared::config::ClientConfig;

use crate::routes::AppState;

/// GET /api/config
pub async fn get_client_config(State(state): State<AppState>) -> Json<ClientConfig> {
    Json(state.client_config.as_ref().clone())
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}
