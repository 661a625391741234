/// API request handlers
use std::sync::Arc;

use axum::http::StatusCode;
use axum::Json;
use tracing::error;
use tracing::warn;

use crate::api::types::ApiResponse;
use crate::api::types::HealthResponse;
use crate::config::AppConfig;
use crate::lexicon::Lexicons;
use crate::ReviewXaiError;

pub mod analyze;
pub mod batch;
pub mod keywords;

pub use analyze::*;
pub use batch::*;
pub use keywords::*;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub lexicons: Arc<Lexicons>,
}

impl AppState {
    pub fn new(config: AppConfig) -> crate::Result<Self> {
        let lexicons = Lexicons::from_config(&config.analysis)?;
        Ok(Self {
            config: Arc::new(config),
            lexicons,
        })
    }
}

/// Error half of every handler result
pub type ApiError<T> = (StatusCode, Json<ApiResponse<T>>);

/// 400 for bad input, 500 for everything else
pub(crate) fn error_response<T>(e: &ReviewXaiError) -> ApiError<T> {
    if e.is_input_error() {
        warn!("Rejected request: {}", e);
        (StatusCode::BAD_REQUEST, Json(ApiResponse::error(e.to_string())))
    } else {
        error!("Request failed: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    }
}

/// Health check handler
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
