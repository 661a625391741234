/// CSV batch handler
use axum::extract::State;
use axum::Json;
use tracing::info;

use super::error_response;
use super::ApiError;
use super::AppState;
use crate::api::types::ApiResponse;
use crate::api::types::BatchRequest;
use crate::api::types::DashboardReport;
use crate::api::view::JsonView;
use crate::dashboard::Dashboard;
use crate::dashboard::ReviewTable;
use crate::ReviewXaiError;

/// Analyze a CSV column (POST /api/batch)
pub async fn analyze_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchRequest>,
) -> Result<Json<ApiResponse<DashboardReport>>, ApiError<DashboardReport>> {
    info!(
        "POST /api/batch column='{}' ({} bytes)",
        request.column,
        request.csv.len()
    );

    let dashboard = Dashboard::with_lexicons(&state.config, state.lexicons.clone());
    let result = tokio::task::spawn_blocking(move || {
        let table = ReviewTable::from_csv_str(&request.csv)?;
        let mut view = JsonView::new().with_cloud_png();
        dashboard.analyze_batch(&table, &request.column, &mut view)?;
        Ok::<_, ReviewXaiError>(view.into_report())
    })
    .await
    .map_err(|e| error_response(&ReviewXaiError::Custom(format!("Batch task failed: {e}"))))?;

    let report = result.map_err(|e| error_response(&e))?;
    Ok(Json(ApiResponse::success(report)))
}
