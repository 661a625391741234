//! HTTP server implementation

use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::config::AppConfig;
use crate::Result;

/// In-flight requests served at once; batch work runs on the blocking pool
const MAX_CONCURRENT_REQUESTS: usize = 64;

/// Assemble the application router with its middleware
pub fn build_app(config: &AppConfig, enable_cors: bool) -> Result<Router> {
    let state = AppState::new(config.clone())?;

    let mut app = Router::new()
        .nest("/api", routes::api_routes(state))
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    if enable_cors {
        info!("✅ CORS enabled");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    Ok(app)
}

/// Start the API server
pub async fn serve_api(config: &AppConfig, host: String, port: u16, enable_cors: bool) -> Result<()> {
    info!("🚀 Starting ReviewXAI API server...");

    let app = build_app(config, enable_cors)?;

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 API server listening on http://{}", addr);
    info!("Available endpoints:");
    info!("  GET  /api/health    - Health check");
    info!("  POST /api/analyze   - Analyze a single review");
    info!("  POST /api/batch     - Analyze a CSV column");
    info!("  POST /api/keywords  - Rank keywords over documents");

    axum::serve(listener, app).await?;

    Ok(())
}
