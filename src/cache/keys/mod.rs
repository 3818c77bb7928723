/// 缓存键模块
/// 提供各类缓存键与计数器键

// 页面数据缓存键
pub mod content_keys;

// 项目浏览量计数键
pub mod project_keys;

// 监控统计计数键
pub mod stats_keys;

pub use content_keys::{PORTFOLIO_DATA_KEY, PROJECT_STATS_KEY};
pub use project_keys::project_views_key;
pub use stats_keys::{CACHE_HITS_KEY, CACHE_MISSES_KEY, TOTAL_VIEWS_KEY};
