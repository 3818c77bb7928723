mod handler;
mod model;

pub use handler::clear_cache;
pub use model::ClearCacheResponse;
