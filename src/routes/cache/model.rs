use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearCacheResponse {
    pub success: bool,
    pub cleared_keys: usize,
    pub message: String,
}

impl ClearCacheResponse {
    pub fn cleared(count: usize) -> Self {
        Self {
            success: true,
            cleared_keys: count,
            message: format!("Cleared {} cache entries", count),
        }
    }
}
