use axum::{
    extract::{Json, State},
    response::IntoResponse,
};
use chrono::Utc;

use crate::{
    AppState,
    cache::{CacheStatus, keys::PORTFOLIO_DATA_KEY, ttl},
};

use super::model::PortfolioPayload;

/// 作品集数据：优先读缓存，未命中时从固定数据生成并写回
#[axum::debug_handler]
pub async fn get_portfolio(State(state): State<AppState>) -> impl IntoResponse {
    let (payload, status) = state
        .cache
        .get_or_insert_with(PORTFOLIO_DATA_KEY, ttl::LONG, || async {
            PortfolioPayload::fresh(Utc::now())
        })
        .await;

    tracing::info!("Portfolio served, cache {}", status.as_str());
    ([(CacheStatus::HEADER, status.as_str())], Json(payload))
}
