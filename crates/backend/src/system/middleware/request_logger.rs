use axum::body::Body;
use axum::http::header::CONTENT_LENGTH;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::shared::format::format_number;

/// Logs method, path, status, latency and (when known) response size
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let elapsed_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();
    let size = response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok())
        .map(format_number)
        .unwrap_or_else(|| "-".to_string());

    if response.status().is_server_error() {
        tracing::warn!("{} {} -> {} in {}ms ({} bytes)", method, path, status, elapsed_ms, size);
    } else {
        tracing::info!("{} {} -> {} in {}ms ({} bytes)", method, path, status, elapsed_ms, size);
    }

    response
}
