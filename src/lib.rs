use cache::{CounterOperations, DataCacheOperations, StatsOperations};
use config::Config;
use store::SharedStore;

pub mod cache;
pub mod config;
pub mod error;
pub mod middleware;
pub mod portfolio;
pub mod router;
pub mod routes;
pub mod store;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub cache: DataCacheOperations,
    pub counters: CounterOperations,
    pub stats: StatsOperations,
}

impl AppState {
    /// 所有操作共享同一个存储实例
    pub fn new(config: Config, store: SharedStore) -> Self {
        Self {
            cache: DataCacheOperations::new(store.clone(), config.clear_pattern.clone()),
            counters: CounterOperations::new(store.clone()),
            stats: StatsOperations::new(store),
            config,
        }
    }
}
