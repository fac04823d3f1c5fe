use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use ns_core::Result;

pub mod error;
pub mod handlers;
pub mod state;

pub use state::AppState;

/// Uploaded PDFs larger than this are rejected.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/summarize/url", post(handlers::summarize_url))
        .route("/api/summarize/homepage", post(handlers::summarize_homepage))
        .route("/api/summarize/pdf", post(handlers::summarize_pdf))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🚀 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use ns_core::{Error, Result, Summary};
    pub use crate::{create_app, serve, AppState};
}
