pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::routes::{configure_routes, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = shared::config::load_config()?;
    let client_config = config
        .client_config()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {}", e))?;
    tracing::info!("Backend-as-a-service at {}", client_config.supabase_url);

    let dist_dir = shared::config::resolve_dist_dir(&config);
    if !dist_dir.join("index.html").exists() {
        tracing::warn!(
            "{} has no index.html; build the frontend before serving it",
            dist_dir.display()
        );
    }

    let state = AppState {
        client_config: Arc::new(client_config),
    };
    let app = configure_routes(state, &dist_dir);

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid bind address '{}': {}", config.server.bind, e))?;

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Address {} is already in use. Stop the other process or set {}.",
                    addr,
                    shared::config::ENV_BIND
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
