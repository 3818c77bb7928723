use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::iso_timestamp;

/// 热门列表的长度
pub const POPULAR_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectStat {
    pub id: String,
    pub title: String,
    pub views: i64,
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total_views: i64,
    pub project_count: usize,
    pub popular_projects: Vec<ProjectStat>,
    pub all_projects: Vec<ProjectStat>,
    pub timestamp: String,
}

impl ProjectStats {
    /// 汇总各项目浏览量；热门列表按浏览量降序，浏览量相同时保持原顺序
    pub fn from_counts(all_projects: Vec<ProjectStat>, at: DateTime<Utc>) -> Self {
        let total_views = all_projects.iter().map(|p| p.views).sum();

        let mut popular_projects = all_projects.clone();
        popular_projects.sort_by(|a, b| b.views.cmp(&a.views));
        popular_projects.truncate(POPULAR_LIMIT);

        Self {
            total_views,
            project_count: all_projects.len(),
            popular_projects,
            all_projects,
            timestamp: iso_timestamp(at),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewCountResponse {
    pub project_id: String,
    pub views: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}
