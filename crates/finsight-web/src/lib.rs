//! HTTP surface of the FinSight service.
//!
//! `GET /` reports liveness, `POST /upload` turns a PDF into text and
//! `POST /ask` answers a question about a block of text.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use finsight_core::Config;

pub mod error;
pub mod handlers;
pub mod models;
pub mod server;
pub mod state;
pub mod upload;

pub use error::ApiError;
pub use state::AppState;

/// Build the application router.
pub fn router(state: Arc<AppState>, config: &Config) -> Router {
    let body_limit = match config.max_upload_bytes {
        Some(max) => DefaultBodyLimit::max(max),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        .route("/", get(handlers::index::index))
        .route("/upload", post(handlers::upload::upload))
        .route("/ask", post(handlers::ask::ask))
        .layer(body_limit)
        .layer(server::cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
