use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
};
use chrono::Utc;
use futures_util::future::join_all;

use crate::{
    AppState,
    cache::{CacheStatus, keys::PROJECT_STATS_KEY, ttl},
    portfolio,
};

use super::model::{ProjectStat, ProjectStats, ViewCountResponse};

/// 各项目浏览量汇总，短时间缓存
#[axum::debug_handler]
pub async fn get_project_stats(State(state): State<AppState>) -> impl IntoResponse {
    let counters = &state.counters;
    let (stats, status) = state
        .cache
        .get_or_insert_with(PROJECT_STATS_KEY, ttl::SHORT, move || async move {
            let reads = portfolio::projects().into_iter().map(|project| async move {
                let views = counters.project_views(&project.id).await;
                ProjectStat {
                    id: project.id,
                    title: project.title,
                    views,
                    featured: project.featured,
                }
            });
            ProjectStats::from_counts(join_all(reads).await, Utc::now())
        })
        .await;

    ([(CacheStatus::HEADER, status.as_str())], Json(stats))
}

#[axum::debug_handler]
pub async fn get_views(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> impl IntoResponse {
    let views = state.counters.project_views(&project_id).await;
    Json(ViewCountResponse {
        project_id,
        views,
        success: None,
    })
}

#[axum::debug_handler]
pub async fn increment_views(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> impl IntoResponse {
    let views = state.counters.increment_project_views(&project_id).await;
    tracing::debug!("Project {} views -> {}", project_id, views);
    Json(ViewCountResponse {
        project_id,
        views,
        success: Some(true),
    })
}
