//! 单元测试用的存储替身

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{KvStore, MemoryStore};
use crate::error::StoreError;

/// 所有命令都失败，模拟存储完全不可达
pub struct FailingStore;

fn unreachable() -> StoreError {
    StoreError::Unavailable("connection refused".to_string())
}

#[async_trait]
impl KvStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(unreachable())
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(unreachable())
    }

    async fn set_ex(&self, _key: &str, _value: &str, _ttl_secs: u64) -> Result<(), StoreError> {
        Err(unreachable())
    }

    async fn incr(&self, _key: &str) -> Result<i64, StoreError> {
        Err(unreachable())
    }

    async fn keys(&self, _pattern: &str) -> Result<Vec<String>, StoreError> {
        Err(unreachable())
    }

    async fn del(&self, _keys: &[String]) -> Result<usize, StoreError> {
        Err(unreachable())
    }

    async fn info(&self, _section: &str) -> Result<String, StoreError> {
        Err(unreachable())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(unreachable())
    }
}

/// 包装内存存储，记录写入方式和删除调用次数
#[derive(Default)]
pub struct RecordingStore {
    pub inner: MemoryStore,
    pub set_calls: AtomicUsize,
    pub set_ex_calls: AtomicUsize,
    pub del_calls: AtomicUsize,
}

impl RecordingStore {
    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KvStore for RecordingStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value).await
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), StoreError> {
        self.set_ex_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.set_ex(key, value, ttl_secs).await
    }

    async fn incr(&self, key: &str) -> Result<i64, StoreError> {
        self.inner.incr(key).await
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        self.inner.keys(pattern).await
    }

    async fn del(&self, keys: &[String]) -> Result<usize, StoreError> {
        self.del_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.del(keys).await
    }

    async fn info(&self, section: &str) -> Result<String, StoreError> {
        self.inner.info(section).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}
