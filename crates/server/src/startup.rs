use std::net::SocketAddr;

use common::env::ensure_data_dir;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = cfg.server.bind_addr();
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {raw}: {e}")))
}

/// Open every store, build the router and serve until the listener fails.
///
/// A snapshot that cannot be decoded stops startup before the socket binds.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    ensure_data_dir(&cfg.storage.data_dir).await?;
    let state = AppState::open(&cfg).await?;

    let app = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg)?;
    info!(%addr, data_dir = %cfg.storage.data_dir.display(), "starting reservation server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
