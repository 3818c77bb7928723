mod handler;
mod model;

pub use handler::{get_project_stats, get_views, increment_views};
pub use model::{ProjectStat, ProjectStats, ViewCountResponse};
