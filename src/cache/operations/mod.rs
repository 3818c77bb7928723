/// 缓存操作
/// 提供基于键值存储的缓存、计数和监控功能

// 通用数据缓存操作
pub mod data;

// 计数器操作
pub mod counter;

// 监控统计操作
pub mod stats;

pub use counter::CounterOperations;
pub use data::DataCacheOperations;
pub use stats::StatsOperations;
