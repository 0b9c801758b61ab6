use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};

use crate::listing::ListingSettings;
use crate::permissions::AdminPolicy;
use crate::storage::Storage;

mod handlers;
pub mod models;

use handlers::{get_repository, health, list_repositories, not_found};

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage + Send + Sync>,
    pub started_at: std::time::SystemTime,
    pub listing: ListingSettings,
    pub admin: AdminPolicy,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/repositories", get(list_repositories))
        .route("/repositories/*name", get(get_repository))
        .fallback(not_found)
        .with_state(state)
}

pub async fn serve(
    addr: SocketAddr,
    state: AppState,
    shutdown: tokio_util::sync::CancellationToken,
) -> anyhow::Result<()> {
    log::info!("🌐 REST service on http://{}", addr);

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            log::info!("🛑 REST shutdown requested");
        })
        .await?;
    log::info!("👋 REST server exited");
    Ok(())
}
