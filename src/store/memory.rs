use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::KvStore;
use crate::error::StoreError;

// 每个键的估算开销，用于模拟 used_memory
const ENTRY_OVERHEAD_BYTES: usize = 64;
const BASE_MEMORY_BYTES: usize = 1024 * 1024;

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// 进程内键值存储，过期键在访问时惰性清理
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn purge_expired(entries: &mut HashMap<String, Entry>) {
        let now = Instant::now();
        entries.retain(|_, entry| !entry.is_expired(now));
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut entries = self.entries.lock().await;
        if entries.get(key).is_some_and(|e| e.is_expired(Instant::now())) {
            entries.remove(key);
            return Ok(None);
        }
        Ok(entries.get(key).map(|e| e.value.clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.lock().await.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: None,
            },
        );
        Ok(())
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), StoreError> {
        self.entries.lock().await.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Some(Instant::now() + Duration::from_secs(ttl_secs)),
            },
        );
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64, StoreError> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        if entries.get(key).is_some_and(|e| e.is_expired(now)) {
            entries.remove(key);
        }

        let entry = entries.entry(key.to_string()).or_insert_with(|| Entry {
            value: "0".to_string(),
            expires_at: None,
        });
        let current: i64 = entry.value.parse().map_err(|_| {
            redis::RedisError::from((
                redis::ErrorKind::TypeError,
                "value is not an integer or out of range",
            ))
        })?;
        let next = current.checked_add(1).ok_or_else(|| {
            redis::RedisError::from((redis::ErrorKind::TypeError, "increment would overflow"))
        })?;
        // 与 Redis 一致，INCR 保留原有的过期时间
        entry.value = next.to_string();
        Ok(next)
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        let mut entries = self.entries.lock().await;
        Self::purge_expired(&mut entries);
        let mut keys: Vec<String> = entries
            .keys()
            .filter(|k| glob_match(pattern.as_bytes(), k.as_bytes()))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn del(&self, keys: &[String]) -> Result<usize, StoreError> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        let removed = keys
            .iter()
            .filter_map(|k| entries.remove(k))
            .filter(|e| !e.is_expired(now))
            .count();
        Ok(removed)
    }

    async fn info(&self, section: &str) -> Result<String, StoreError> {
        let mut entries = self.entries.lock().await;
        Self::purge_expired(&mut entries);

        let used: usize = BASE_MEMORY_BYTES
            + entries
                .iter()
                .map(|(k, e)| k.len() + e.value.len() + ENTRY_OVERHEAD_BYTES)
                .sum::<usize>();

        let info = match section.to_ascii_lowercase().as_str() {
            "memory" => format!("# Memory\r\nused_memory:{}\r\nmaxmemory:0\r\n", used),
            "clients" => "# Clients\r\nconnected_clients:1\r\nblocked_clients:0\r\n".to_string(),
            _ => String::new(),
        };
        Ok(info)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// KEYS 风格的通配匹配，支持 `*`、`?` 和反斜杠转义
pub fn glob_match(pattern: &[u8], text: &[u8]) -> bool {
    let (mut p, mut t) = (0usize, 0usize);
    // 最近一个 `*` 的位置以及它当时对应的文本位置
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some(b'*') => {
                star = Some((p, t));
                p += 1;
                continue;
            }
            Some(b'?') => {
                p += 1;
                t += 1;
                continue;
            }
            Some(b'\\') if p + 1 < pattern.len() && pattern[p + 1] == text[t] => {
                p += 2;
                t += 1;
                continue;
            }
            Some(&c) if c != b'\\' && c == text[t] => {
                p += 1;
                t += 1;
                continue;
            }
            _ => {}
        }

        match star {
            Some((sp, st)) => {
                p = sp + 1;
                t = st + 1;
                star = Some((sp, st + 1));
            }
            None => return false,
        }
    }

    pattern[p.min(pattern.len())..].iter().all(|&c| c == b'*')
}
