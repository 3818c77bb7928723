//! 连接管理
//!
//! 进程内只维护一条到存储的连接：
//! - 并发请求共享同一次正在进行的建连（互斥锁内懒初始化）
//! - 建连失败时按线性退避重试，超过次数后把错误交给调用方
//! - 连接运行时出错会被标记失效，下一次 `acquire` 重新建连

use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::StoreError;

/// 单次退避的上限
const MAX_BACKOFF_MS: u64 = 1000;
const BACKOFF_STEP_MS: u64 = 100;

#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Connection: Clone + Send + Sync + 'static;

    async fn connect(&self) -> Result<Self::Connection, StoreError>;
}

/// 基于 redis 多路复用连接的建连器
pub struct RedisConnector {
    client: redis::Client,
}

impl RedisConnector {
    pub fn open(redis_url: &str) -> Result<Self, StoreError> {
        Ok(Self {
            client: redis::Client::open(redis_url)?,
        })
    }
}

#[async_trait]
impl Connector for RedisConnector {
    type Connection = MultiplexedConnection;

    async fn connect(&self) -> Result<MultiplexedConnection, StoreError> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => ConnectionState::Connecting,
            2 => ConnectionState::Connected,
            _ => ConnectionState::Disconnected,
        }
    }
}

/// 借出的连接，带上建立时的代次，用于精确地作废这一条连接
#[derive(Debug, Clone)]
pub struct Lease<T> {
    conn: T,
    generation: u64,
}

impl<T> Lease<T> {
    pub fn connection(&self) -> &T {
        &self.conn
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

struct Slot<T> {
    conn: Option<T>,
    generation: u64,
    last_failure: Option<String>,
}

pub struct ConnectionManager<C: Connector> {
    connector: C,
    connect_timeout: Duration,
    max_retries: u32,
    slot: Mutex<Slot<C::Connection>>,
    // 已结束的建连轮次，等待者据此判断是否刚好错过了一次失败的建连
    rounds: AtomicU64,
    state: AtomicU8,
}

impl<C: Connector> ConnectionManager<C> {
    pub fn new(connector: C, connect_timeout: Duration, max_retries: u32) -> Self {
        Self {
            connector,
            connect_timeout,
            max_retries,
            slot: Mutex::new(Slot {
                conn: None,
                generation: 0,
                last_failure: None,
            }),
            rounds: AtomicU64::new(0),
            state: AtomicU8::new(ConnectionState::Disconnected as u8),
        }
    }

    pub fn state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn set_state(&self, state: ConnectionState) {
        self.state.store(state as u8, Ordering::Release);
    }

    /// 获取共享连接；已有连接直接返回，否则建立新连接
    pub async fn acquire(&self) -> Result<Lease<C::Connection>, StoreError> {
        let seen = self.rounds.load(Ordering::Acquire);
        let mut slot = self.slot.lock().await;

        if let Some(conn) = &slot.conn {
            return Ok(Lease {
                conn: conn.clone(),
                generation: slot.generation,
            });
        }

        // 排队期间另一个调用者的建连已经失败，直接共享这个结果
        if self.rounds.load(Ordering::Acquire) != seen {
            if let Some(reason) = &slot.last_failure {
                return Err(StoreError::Unavailable(reason.clone()));
            }
        }

        self.set_state(ConnectionState::Connecting);
        let result = self.connect_with_retry().await;
        self.rounds.fetch_add(1, Ordering::AcqRel);

        match result {
            Ok(conn) => {
                slot.generation += 1;
                slot.conn = Some(conn.clone());
                slot.last_failure = None;
                self.set_state(ConnectionState::Connected);
                info!("Redis connection established (generation {})", slot.generation);
                Ok(Lease {
                    conn,
                    generation: slot.generation,
                })
            }
            Err(e) => {
                slot.last_failure = Some(e.to_string());
                self.set_state(ConnectionState::Disconnected);
                warn!("Redis connection failed: {}", e);
                Err(e)
            }
        }
    }

    /// 作废出错的连接；只作废借出时的那一代，避免误伤已经重建的新连接
    pub async fn invalidate(&self, lease: &Lease<C::Connection>) {
        let mut slot = self.slot.lock().await;
        if slot.conn.is_some() && slot.generation == lease.generation {
            slot.conn = None;
            self.set_state(ConnectionState::Disconnected);
            warn!(
                "Redis connection (generation {}) marked broken, reconnecting on next use",
                lease.generation
            );
        }
    }

    /// 主动断开，进程退出时调用
    pub async fn close(&self) {
        let mut slot = self.slot.lock().await;
        if slot.conn.take().is_some() {
            info!("Redis connection closed");
        }
        self.set_state(ConnectionState::Disconnected);
    }

    async fn connect_with_retry(&self) -> Result<C::Connection, StoreError> {
        let mut retries = 0u32;
        loop {
            let attempt = tokio::time::timeout(self.connect_timeout, self.connector.connect()).await;
            let err = match attempt {
                Ok(Ok(conn)) => return Ok(conn),
                Ok(Err(e)) => e,
                Err(_) => StoreError::ConnectTimeout(self.connect_timeout),
            };

            if retries >= self.max_retries {
                if retries == 0 {
                    return Err(err);
                }
                return Err(StoreError::RetriesExhausted {
                    attempts: retries + 1,
                    last: Box::new(err),
                });
            }

            retries += 1;
            let delay = reconnect_delay(retries);
            warn!(
                "Redis connect attempt {} failed: {}; retrying in {:?}",
                retries, err, delay
            );
            tokio::time::sleep(delay).await;
        }
    }
}

/// 第 n 次重试前的等待时间：min(n * 100ms, 1000ms)
pub fn reconnect_delay(retries: u32) -> Duration {
    Duration::from_millis((u64::from(retries) * BACKOFF_STEP_MS).min(MAX_BACKOFF_MS))
}
