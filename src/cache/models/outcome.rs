/// 一次缓存查询的结果
///
/// 反序列化失败按未命中处理；只有存储本身不可用时才是 `Unavailable`。
#[derive(Debug, Clone, PartialEq)]
pub enum CacheOutcome<T> {
    Hit(T),
    Miss,
    Unavailable,
}

impl<T> CacheOutcome<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            CacheOutcome::Hit(value) => Some(value),
            CacheOutcome::Miss | CacheOutcome::Unavailable => None,
        }
    }
}

/// 读穿缓存的来源，对应响应头 `X-Cache`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
    Error,
}

impl CacheStatus {
    pub const HEADER: &'static str = "x-cache";

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
            CacheStatus::Error => "ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_option() {
        assert_eq!(CacheOutcome::Hit(3).into_option(), Some(3));
        assert_eq!(CacheOutcome::<i32>::Miss.into_option(), None);
        assert_eq!(CacheOutcome::<i32>::Unavailable.into_option(), None);
    }

    #[test]
    fn test_status_header_values() {
        assert_eq!(CacheStatus::Hit.as_str(), "HIT");
        assert_eq!(CacheStatus::Miss.as_str(), "MISS");
        assert_eq!(CacheStatus::Error.as_str(), "ERROR");
    }
}
