use tracing::{debug, error, warn};

use crate::cache::keys::{TOTAL_VIEWS_KEY, project_views_key};
use crate::store::SharedStore;

/// 计数器操作
///
/// 自增依赖存储端 INCR 的原子性，客户端不加锁。
#[derive(Clone)]
pub struct CounterOperations {
    store: SharedStore,
}

impl CounterOperations {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// 原子加一并返回新值，同时累加全局浏览总量；失败时返回 0
    ///
    /// 两次自增相互独立，并发下全局总量与各项之和可能短暂不一致。
    pub async fn increment(&self, key: &str) -> i64 {
        let count = match self.store.incr(key).await {
            Ok(count) => count,
            Err(e) => {
                error!("Redis INCR error for key {}: {}", key, e);
                return 0;
            }
        };

        if let Err(e) = self.store.incr(TOTAL_VIEWS_KEY).await {
            debug!("Failed to bump {}: {}", TOTAL_VIEWS_KEY, e);
        }

        count
    }

    /// 读取当前值，不存在或读取失败时为 0，不会返回负数
    pub async fn read(&self, key: &str) -> i64 {
        match self.store.get(key).await {
            Ok(Some(raw)) => match raw.trim().parse::<i64>() {
                Ok(value) => value.max(0),
                Err(_) => {
                    warn!("Counter {} holds a non-integer value: {:?}", key, raw);
                    0
                }
            },
            Ok(None) => 0,
            Err(e) => {
                error!("Redis GET error for counter {}: {}", key, e);
                0
            }
        }
    }

    pub async fn increment_project_views(&self, project_id: &str) -> i64 {
        self.increment(&project_views_key(project_id)).await
    }

    pub async fn project_views(&self, project_id: &str) -> i64 {
        self.read(&project_views_key(project_id)).await
    }
}
