/// 缓存数据模型
/// 定义缓存查询结果和监控快照结构

// 缓存查询结果
pub mod outcome;

// 监控统计快照
pub mod stats;

pub use outcome::{CacheOutcome, CacheStatus};
pub use stats::{
    Alert, AlertLevel, HealthStatus, InfoMetrics, StatsInputs, StatsSnapshot, hit_rate_percent,
};
