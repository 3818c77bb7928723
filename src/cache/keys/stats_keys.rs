/// 缓存命中次数
pub const CACHE_HITS_KEY: &str = "stats:cache:hits";

/// 缓存未命中次数
pub const CACHE_MISSES_KEY: &str = "stats:cache:misses";

/// 全部项目的浏览总量
pub const TOTAL_VIEWS_KEY: &str = "stats:views:total";
