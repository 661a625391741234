/// Single review handler
use axum::extract::State;
use axum::Json;
use tracing::info;

use super::error_response;
use super::ApiError;
use super::AppState;
use crate::api::types::AnalyzeRequest;
use crate::api::types::ApiResponse;
use crate::api::types::DashboardReport;
use crate::api::view::JsonView;
use crate::dashboard::Dashboard;
use crate::ReviewXaiError;

/// Analyze one review (POST /api/analyze)
pub async fn analyze_review(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<ApiResponse<DashboardReport>>, ApiError<DashboardReport>> {
    info!("POST /api/analyze ({} chars)", request.text.len());

    let mut config = (*state.config).clone();
    if let Some(n) = request.keywords {
        if n == 0 {
            return Err(error_response(&ReviewXaiError::InvalidInput(
                "keywords must be at least 1".to_string(),
            )));
        }
        config.analysis.keyword_count = n;
    }

    let dashboard = Dashboard::with_lexicons(&config, state.lexicons.clone());
    let mut view = JsonView::new();
    dashboard
        .analyze_single(&request.text, &mut view)
        .map_err(|e| error_response(&e))?;

    Ok(Json(ApiResponse::success(view.into_report())))
}
