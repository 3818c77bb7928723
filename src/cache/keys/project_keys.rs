/// 项目缓存键前缀
const PROJECT_PREFIX: &str = "project:";

/// 生成项目浏览量计数键
pub fn project_views_key(project_id: &str) -> String {
    format!("{}{}:views", PROJECT_PREFIX, project_id)
}
