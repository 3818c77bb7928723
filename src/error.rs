use std::time::Duration;

use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// 存储层错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("connection attempt timed out after {0:?}")]
    ConnectTimeout(Duration),

    /// 重试次数用尽，保留最后一次失败原因
    #[error("gave up connecting after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: Box<StoreError> },

    #[error("value serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Unavailable(String),
}

impl StoreError {
    /// 是否为传输层错误（需要让连接管理器重建连接）
    pub fn is_transport(&self) -> bool {
        match self {
            StoreError::Redis(e) => {
                e.is_io_error()
                    || e.is_timeout()
                    || e.is_connection_dropped()
                    || e.is_connection_refusal()
            }
            StoreError::ConnectTimeout(_)
            | StoreError::RetriesExhausted { .. }
            | StoreError::Unavailable(_) => true,
            StoreError::Serialization(_) => false,
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    /// 存储不可达，无法给出有意义的结果
    StoreUnavailable { message: String, details: String },
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            AppError::StoreUnavailable { message, details } => {
                (StatusCode::SERVICE_UNAVAILABLE, message, Some(details))
            }
            AppError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message, None),
        };

        (status, Json(ErrorResponse { error, details })).into_response()
    }
}
