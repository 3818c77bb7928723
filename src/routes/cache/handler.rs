use axum::extract::{Json, State};

use crate::{AppState, error::AppError};

use super::model::ClearCacheResponse;

/// 管理用的批量清空
#[axum::debug_handler]
pub async fn clear_cache(State(state): State<AppState>) -> Result<Json<ClearCacheResponse>, AppError> {
    match state.cache.clear_all().await {
        Ok(count) => Ok(Json(ClearCacheResponse::cleared(count))),
        Err(e) => {
            tracing::error!("Error clearing cache: {}", e);
            Err(AppError::Internal("Failed to clear cache".to_string()))
        }
    }
}
