//! API route definitions

use axum::routing::get;
use axum::routing::post;
use axum::Router;

use super::handlers::AppState;
use super::handlers::{
    self,
};

/// Create RESTful API router
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Dashboard modes
        .route("/analyze", post(handlers::analyze_review))
        .route("/batch", post(handlers::analyze_batch))
        // Keyword ranking
        .route("/keywords", post(handlers::rank_keywords))
        .with_state(state)
}
