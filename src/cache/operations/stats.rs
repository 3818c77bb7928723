use std::time::{Duration, Instant};

use chrono::Utc;

use crate::cache::keys::{CACHE_HITS_KEY, CACHE_MISSES_KEY, TOTAL_VIEWS_KEY};
use crate::cache::models::{InfoMetrics, StatsInputs, StatsSnapshot};
use crate::error::StoreError;
use crate::store::SharedStore;

/// 监控统计操作
///
/// 和缓存操作不同，这里的失败会直接返回给调用方：存储不可达时没有可用的降级结果。
#[derive(Clone)]
pub struct StatsOperations {
    store: SharedStore,
}

impl StatsOperations {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// 并发读取计数器和 INFO；各项读取互相独立，不是一个原子快照
    pub async fn collect(&self) -> Result<StatsInputs, StoreError> {
        let (hits, misses, total_views, memory, clients) = tokio::try_join!(
            self.read_counter(CACHE_HITS_KEY),
            self.read_counter(CACHE_MISSES_KEY),
            self.read_counter(TOTAL_VIEWS_KEY),
            self.store.info("memory"),
            self.store.info("clients"),
        )?;

        let mut info = InfoMetrics::parse(&memory);
        info.merge(InfoMetrics::parse(&clients));

        Ok(StatsInputs {
            hits,
            misses,
            total_views,
            info,
        })
    }

    pub async fn snapshot(&self) -> Result<StatsSnapshot, StoreError> {
        let inputs = self.collect().await?;
        Ok(StatsSnapshot::compute(&inputs, Utc::now()))
    }

    /// PING 一次并返回往返耗时
    pub async fn probe(&self) -> Result<Duration, StoreError> {
        let started = Instant::now();
        self.store.ping().await?;
        Ok(started.elapsed())
    }

    async fn read_counter(&self, key: &str) -> Result<u64, StoreError> {
        let raw = self.store.get(key).await?;
        Ok(raw
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map_or(0, |v| v.max(0) as u64))
    }
}
