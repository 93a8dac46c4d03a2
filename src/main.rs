//! Link preview HTTP service
//!
//! Serves `POST /api/link-preview` on `LISTEN_ADDR` (default 127.0.0.1:3000).

use std::env;
use std::net::SocketAddr;

use link_preview::api::{self, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr: SocketAddr = env::var("LISTEN_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()?;

    let app = api::router(AppState::default());
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "link-preview service listening");
    axum::serve(listener, app).await?;

    Ok(())
}
