//! 作品集内容
//!
//! 随构建一起发布的固定数据，是缓存背后的数据来源。

mod data;
pub mod model;

pub use data::{experience, presentations, projects, skills};
pub use model::{Experience, Presentation, Project, ProjectStatus, Skill, SkillCategory};
