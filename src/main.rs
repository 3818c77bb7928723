use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use portfolio_cache::{
    AppState,
    config::{Config, StoreBackend},
    router::create_router,
    store::{MemoryStore, RedisStore, SharedStore},
};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env();

    #[cfg(debug_assertions)]
    tracing::info!("Running in debug mode with CORS enabled");

    #[cfg(not(debug_assertions))]
    tracing::info!("Running in production mode with CORS disabled");

    // 设置存储；Redis 在第一次使用时才建立连接
    let redis = match config.backend {
        StoreBackend::Redis => Some(RedisStore::from_config(&config).expect("Invalid REDIS_URL")),
        StoreBackend::Memory => None,
    };
    let store: SharedStore = match &redis {
        Some(redis) => {
            tracing::info!("Using Redis store at {}", config.redis_url);
            Arc::new(redis.clone())
        }
        None => {
            tracing::warn!("Using in-process memory store, data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    // 设置应用状态
    let state = AppState::new(config.clone(), store);
    let app = create_router(state);

    // 启动服务器
    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app,
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Failed to start server");

    if let Some(redis) = redis {
        redis.manager().close().await;
    }
    tracing::info!("Server shutdown complete");
}

// 等待 Ctrl+C 或 SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
