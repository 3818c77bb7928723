mod handler;
mod model;

pub use handler::redis_health;
pub use model::{ProbeStatus, RedisHealth, RedisProbe};
