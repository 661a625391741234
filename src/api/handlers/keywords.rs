/// Keyword ranking handler
use axum::extract::State;
use axum::Json;
use tracing::info;

use super::error_response;
use super::ApiError;
use super::AppState;
use crate::analysis::keywords::KeywordRanker;
use crate::api::types::ApiResponse;
use crate::api::types::KeywordScore;
use crate::api::types::KeywordsRequest;
use crate::api::types::KeywordsResponse;

/// Rank keywords over a set of documents (POST /api/keywords)
pub async fn rank_keywords(
    State(state): State<AppState>,
    Json(request): Json<KeywordsRequest>,
) -> Result<Json<ApiResponse<KeywordsResponse>>, ApiError<KeywordsResponse>> {
    let n = request.n.unwrap_or_else(|| state.config.keyword_count());
    info!(
        "POST /api/keywords ({} documents, n={})",
        request.documents.len(),
        n
    );

    let ranker = KeywordRanker::new(state.lexicons.clone(), state.config.analysis.max_features);
    let ranked = ranker
        .score_terms(request.documents.as_slice())
        .map_err(|e| error_response(&e))?;

    let keywords = ranked
        .into_iter()
        .take(n)
        .map(|scored| KeywordScore {
            term: scored.term,
            score: scored.score,
        })
        .collect();
    Ok(Json(ApiResponse::success(KeywordsResponse { keywords })))
}
