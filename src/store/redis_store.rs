use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;

use super::KvStore;
use super::connection::{ConnectionManager, ConnectionState, RedisConnector};
use crate::config::Config;
use crate::error::StoreError;

/// Redis 存储，所有命令共享连接管理器持有的那一条连接
#[derive(Clone)]
pub struct RedisStore {
    manager: Arc<ConnectionManager<RedisConnector>>,
}

impl RedisStore {
    pub fn new(manager: Arc<ConnectionManager<RedisConnector>>) -> Self {
        Self { manager }
    }

    pub fn from_config(config: &Config) -> Result<Self, StoreError> {
        let connector = RedisConnector::open(&config.redis_url)?;
        let manager = ConnectionManager::new(connector, config.connect_timeout(), config.max_retries);
        Ok(Self::new(Arc::new(manager)))
    }

    pub fn manager(&self) -> &Arc<ConnectionManager<RedisConnector>> {
        &self.manager
    }

    pub fn state(&self) -> ConnectionState {
        self.manager.state()
    }

    // 执行一条命令；传输层错误会让连接失效，下次调用时重建
    async fn run<T, F, Fut>(&self, command: F) -> Result<T, StoreError>
    where
        F: FnOnce(MultiplexedConnection) -> Fut + Send,
        Fut: Future<Output = redis::RedisResult<T>> + Send,
    {
        let lease = self.manager.acquire().await?;
        match command(lease.connection().clone()).await {
            Ok(value) => Ok(value),
            Err(e) => {
                let err = StoreError::from(e);
                if err.is_transport() {
                    self.manager.invalidate(&lease).await;
                }
                Err(err)
            }
        }
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.run(|mut conn| async move { conn.get::<_, Option<String>>(key).await })
            .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.run(|mut conn| async move { conn.set::<_, _, ()>(key, value).await })
            .await
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), StoreError> {
        self.run(|mut conn| async move { conn.set_ex::<_, _, ()>(key, value, ttl_secs).await })
            .await
    }

    async fn incr(&self, key: &str) -> Result<i64, StoreError> {
        self.run(|mut conn| async move { conn.incr::<_, _, i64>(key, 1).await })
            .await
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        self.run(|mut conn| async move { conn.keys::<_, Vec<String>>(pattern).await })
            .await
    }

    async fn del(&self, keys: &[String]) -> Result<usize, StoreError> {
        if keys.is_empty() {
            return Ok(0);
        }
        let keys = keys.to_vec();
        self.run(|mut conn| async move { conn.del::<_, usize>(keys).await })
            .await
    }

    async fn info(&self, section: &str) -> Result<String, StoreError> {
        self.run(|mut conn| async move {
            let mut cmd = redis::cmd("INFO");
            cmd.arg(section);
            cmd.query_async::<String>(&mut conn).await
        })
        .await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.run(|mut conn| async move {
            redis::cmd("PING").query_async::<String>(&mut conn).await
        })
        .await
        .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    // 本地 1 号端口没有服务监听，建连会被直接拒绝
    fn unreachable_store() -> RedisStore {
        let config = Config {
            redis_url: "redis://127.0.0.1:1".to_string(),
            connect_timeout_ms: 200,
            max_retries: 1,
            ..Config::default()
        };
        RedisStore::from_config(&config).unwrap()
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let config = Config {
            redis_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(RedisStore::from_config(&config).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_store_surfaces_errors() {
        let store = unreachable_store();
        assert_eq!(store.state(), ConnectionState::Disconnected);

        let err = store.get("portfolio:data").await.unwrap_err();
        assert!(err.is_transport());
        assert!(store.ping().await.is_err());
        assert_eq!(store.state(), ConnectionState::Disconnected);
    }

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    // 本地假服务：应答建连时的 CLIENT 命令，收到 GET 时直接断开；每接受一个连接发一次通知
    async fn spawn_dropping_server() -> (String, mpsc::UnboundedReceiver<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let _ = tx.send(());
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 4096];
                    loop {
                        let n = match socket.read(&mut buf).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => n,
                        };
                        let chunk = &buf[..n];
                        if count(chunk, b"GET") > 0 {
                            return;
                        }
                        for _ in 0..count(chunk, b"CLIENT") {
                            if socket.write_all(b"+OK\r\n").await.is_err() {
                                return;
                            }
                        }
                    }
                });
            }
        });

        (format!("redis://{}", addr), rx)
    }

    #[tokio::test]
    async fn test_dropped_connection_is_rebuilt() {
        let (redis_url, mut accepted) = spawn_dropping_server().await;
        let config = Config {
            redis_url,
            connect_timeout_ms: 1000,
            max_retries: 0,
            ..Config::default()
        };
        let store = RedisStore::from_config(&config).unwrap();

        let err = store.get("portfolio:data").await.unwrap_err();
        assert!(err.is_transport(), "unexpected error: {}", err);
        assert_eq!(store.state(), ConnectionState::Disconnected);
        accepted.recv().await.unwrap();

        // 下一次调用重新建连
        let _ = store.get("portfolio:data").await;
        tokio::time::timeout(Duration::from_secs(1), accepted.recv())
            .await
            .expect("no reconnect")
            .unwrap();
    }

    #[tokio::test]
    async fn test_empty_delete_skips_round_trip() {
        let store = unreachable_store();
        assert_eq!(store.del(&[]).await.unwrap(), 0);
    }
}
