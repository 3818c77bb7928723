/// 作品集整体数据
pub const PORTFOLIO_DATA_KEY: &str = "portfolio:data";

/// 项目浏览量汇总
pub const PROJECT_STATS_KEY: &str = "projects:stats";
