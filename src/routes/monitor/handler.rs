use axum::extract::{Json, State};

use crate::{AppState, cache::StatsSnapshot, error::AppError};

/// 监控快照；告警不影响状态码，只有取数失败才返回 503
#[axum::debug_handler]
pub async fn redis_monitor(State(state): State<AppState>) -> Result<Json<StatsSnapshot>, AppError> {
    match state.stats.snapshot().await {
        Ok(snapshot) => {
            if !snapshot.alerts.is_empty() {
                tracing::warn!("Redis monitor raised {} alert(s)", snapshot.alerts.len());
            }
            Ok(Json(snapshot))
        }
        Err(e) => {
            tracing::error!("Redis monitoring error: {}", e);
            Err(AppError::StoreUnavailable {
                message: "Failed to fetch monitoring data".to_string(),
                details: e.to_string(),
            })
        }
    }
}
