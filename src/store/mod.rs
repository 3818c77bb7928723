//! 键值存储抽象
//!
//! 缓存、计数器和监控都只通过 [`KvStore`] 访问存储，
//! 生产环境使用 Redis，本地运行可以切换到进程内存储。

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreError;

pub mod connection;
pub mod memory;
pub mod redis_store;

#[cfg(test)]
pub(crate) mod testing;

pub use connection::{ConnectionManager, ConnectionState, Connector, Lease, RedisConnector};
pub use memory::MemoryStore;
pub use redis_store::RedisStore;

/// 存储支持的命令集合：GET / SET [EX] / INCR / KEYS / DEL / INFO / PING
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// 写入且不过期
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), StoreError>;

    /// 原子加一，键不存在时视为 0
    async fn incr(&self, key: &str) -> Result<i64, StoreError>;

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError>;

    /// 返回实际删除的键数量
    async fn del(&self, keys: &[String]) -> Result<usize, StoreError>;

    async fn info(&self, section: &str) -> Result<String, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

pub type SharedStore = Arc<dyn KvStore>;
