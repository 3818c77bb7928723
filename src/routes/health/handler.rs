use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;

use crate::{AppState, utils::iso_timestamp};

use super::model::{ProbeStatus, RedisHealth, RedisProbe};

/// 存储连通性探测：健康返回 200，否则 503
#[axum::debug_handler]
pub async fn redis_health(State(state): State<AppState>) -> impl IntoResponse {
    let timestamp = iso_timestamp(Utc::now());

    match state.stats.probe().await {
        Ok(elapsed) => (
            StatusCode::OK,
            Json(RedisHealth {
                status: ProbeStatus::Healthy,
                redis: RedisProbe {
                    connected: true,
                    response_time: Some(elapsed.as_millis() as u64),
                    error: None,
                },
                timestamp,
            }),
        ),
        Err(e) => {
            tracing::warn!("Redis health probe failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(RedisHealth {
                    status: ProbeStatus::Unhealthy,
                    redis: RedisProbe {
                        connected: false,
                        response_time: None,
                        error: Some(e.to_string()),
                    },
                    timestamp,
                }),
            )
        }
    }
}
