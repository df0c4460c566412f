//! HTTP server for wedding-site.
//!
//! Renders the invitation pages, keeps one RSVP form controller per page load
//! and serves `.ics` downloads.

mod routes;
mod sessions;
mod state;
pub mod views;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::trace::TraceLayer;
use wedding_core::SiteConfig;

pub use sessions::SessionStore;
pub use state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::pages::router())
        .merge(routes::calendar::router())
        .merge(routes::rsvp::router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Serve the site until the process is stopped.
pub async fn serve(site: SiteConfig) -> Result<()> {
    let addr: SocketAddr = site
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address: {}", site.bind))?;

    let app = router(AppState::new(site)?);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("wedding-server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
