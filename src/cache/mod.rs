// 缓存模块
// 包含缓存键、缓存数据结构和基于存储的缓存/计数/监控操作

pub mod keys;
pub mod models;
pub mod operations;

/// 缓存有效期（秒）
pub mod ttl {
    /// 1 分钟，统计类数据
    pub const SHORT: i64 = 60;
    /// 1 小时，作品集内容
    pub const LONG: i64 = 3600;
    /// 不过期，小于等于 0 的值都按不过期处理
    pub const NO_EXPIRY: i64 = -1;
}

// 重新导出常用类型，方便其他模块使用
pub use models::{CacheOutcome, CacheStatus, StatsSnapshot};
pub use operations::{CounterOperations, DataCacheOperations, StatsOperations};
