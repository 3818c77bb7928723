use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{AppState, middleware::log_errors, routes};

// 作品集内容路由
pub fn portfolio_routes() -> Router<AppState> {
    Router::new().route("/portfolio", get(routes::portfolio::get_portfolio))
}

// 项目浏览量路由
pub fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/projects/stats", get(routes::projects::get_project_stats))
        .route(
            "/projects/{id}/views",
            get(routes::projects::get_views).post(routes::projects::increment_views),
        )
}

// 缓存管理路由
pub fn cache_routes() -> Router<AppState> {
    Router::new().route("/cache/clear", post(routes::cache::clear_cache))
}

// 健康检查和监控路由
pub fn monitoring_routes() -> Router<AppState> {
    Router::new()
        .route("/health/redis", get(routes::health::redis_health))
        .route("/monitor/redis", get(routes::monitor::redis_monitor))
}

// 创建主路由，所有接口挂在 api_base_uri 之下
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(portfolio_routes())
        .merge(project_routes())
        .merge(cache_routes())
        .merge(monitoring_routes());

    let base = state.config.api_base_uri.trim_matches('/');
    let router = if base.is_empty() {
        api
    } else {
        Router::new().nest(&format!("/{}", base), api)
    };

    let router = router
        .layer(axum::middleware::from_fn(log_errors))
        .layer(TraceLayer::new_for_http());

    // 开发模式下允许任意来源跨域
    #[cfg(debug_assertions)]
    let router = router.layer(tower_http::cors::CorsLayer::permissive());

    router.with_state(state)
}
