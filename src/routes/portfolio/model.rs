use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::portfolio::{self, Experience, Presentation, Project, Skill};
use crate::utils::iso_timestamp;

/// `GET /portfolio` 的响应体，同时也是缓存的内容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioPayload {
    pub projects: Vec<Project>,
    pub skills: Vec<Skill>,
    pub experience: Vec<Experience>,
    pub presentations: Vec<Presentation>,
    pub timestamp: String,
}

impl PortfolioPayload {
    /// 从固定数据生成
    pub fn fresh(at: DateTime<Utc>) -> Self {
        Self {
            projects: portfolio::projects(),
            skills: portfolio::skills(),
            experience: portfolio::experience(),
            presentations: portfolio::presentations(),
            timestamp: iso_timestamp(at),
        }
    }
}
