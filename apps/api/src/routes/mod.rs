pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction;
use crate::generation::handlers;
use crate::state::AppState;

/// Uploaded resumes can exceed Axum's 2 MB default body limit.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/extract", post(extraction::handle_extract))
        .route("/api/generate-pdf", post(handlers::handle_generate_pdf))
        .route("/api/latest-pdf", get(handlers::handle_latest_pdf))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
