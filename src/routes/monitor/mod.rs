mod handler;

pub use handler::redis_monitor;
