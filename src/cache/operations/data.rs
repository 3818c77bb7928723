use std::future::Future;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, error, info, warn};

use crate::cache::keys::{CACHE_HITS_KEY, CACHE_MISSES_KEY};
use crate::cache::models::{CacheOutcome, CacheStatus};
use crate::error::StoreError;
use crate::store::SharedStore;

/// 通用数据缓存操作
///
/// 缓存只是优化手段：读写失败都会被记录日志并降级为未命中，不会影响调用方。
#[derive(Clone)]
pub struct DataCacheOperations {
    store: SharedStore,
    clear_pattern: String,
}

impl DataCacheOperations {
    pub fn new(store: SharedStore, clear_pattern: impl Into<String>) -> Self {
        Self {
            store,
            clear_pattern: clear_pattern.into(),
        }
    }

    /// 查询缓存，并区分未命中与存储不可用
    pub async fn lookup<T: DeserializeOwned>(&self, key: &str) -> CacheOutcome<T> {
        match self.store.get(key).await {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(value) => {
                    self.record(CACHE_HITS_KEY).await;
                    CacheOutcome::Hit(value)
                }
                Err(e) => {
                    warn!("Discarding unreadable cached value for key {}: {}", key, e);
                    self.record(CACHE_MISSES_KEY).await;
                    CacheOutcome::Miss
                }
            },
            Ok(None) => {
                self.record(CACHE_MISSES_KEY).await;
                CacheOutcome::Miss
            }
            Err(e) => {
                error!("Redis GET error for key {}: {}", key, e);
                CacheOutcome::Unavailable
            }
        }
    }

    /// 读取缓存，任何失败都视为不存在
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.lookup(key).await.into_option()
    }

    /// 写入缓存；`ttl_secs <= 0` 时不过期。返回是否写入成功
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T, ttl_secs: i64) -> bool {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize value for key {}: {}", key, e);
                return false;
            }
        };

        let result = if ttl_secs > 0 {
            self.store.set_ex(key, &json, ttl_secs as u64).await
        } else {
            self.store.set(key, &json).await
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                error!("Redis SET error for key {}: {}", key, e);
                false
            }
        }
    }

    /// 读穿缓存：命中直接返回，否则计算后写回
    ///
    /// 存储不可用时仍然返回计算结果，只是不再尝试写回。
    pub async fn get_or_insert_with<T, F, Fut>(
        &self,
        key: &str,
        ttl_secs: i64,
        compute: F,
    ) -> (T, CacheStatus)
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        match self.lookup::<T>(key).await {
            CacheOutcome::Hit(value) => {
                debug!("Serving {} from cache", key);
                (value, CacheStatus::Hit)
            }
            CacheOutcome::Miss => {
                debug!("Cache miss for {}, computing fresh value", key);
                let value = compute().await;
                self.set(key, &value, ttl_secs).await;
                (value, CacheStatus::Miss)
            }
            CacheOutcome::Unavailable => (compute().await, CacheStatus::Error),
        }
    }

    /// 批量清空缓存，返回清除的键数量；没有键时不发送删除命令
    pub async fn clear_all(&self) -> Result<usize, StoreError> {
        let keys = self.store.keys(&self.clear_pattern).await?;
        if keys.is_empty() {
            return Ok(0);
        }

        self.store.del(&keys).await?;
        info!("Cleared {} cache entries", keys.len());
        Ok(keys.len())
    }

    // 命中/未命中统计只用于监控，失败时忽略
    async fn record(&self, counter_key: &str) {
        if let Err(e) = self.store.incr(counter_key).await {
            debug!("Failed to record {}: {}", counter_key, e);
        }
    }
}
