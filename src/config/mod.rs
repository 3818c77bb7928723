use std::env;
use std::str::FromStr;
use std::time::Duration;

/// 存储后端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    /// 进程内存储，便于本地运行
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(StoreBackend::Redis),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown cache backend: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub redis_url: String,
    pub backend: StoreBackend,
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    pub connect_timeout_ms: u64,
    pub max_retries: u32,
    pub clear_pattern: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let defaults = Config::default();
        Config {
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            backend: env_or("CACHE_BACKEND", defaults.backend),
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            api_base_uri: env::var("API_BASE_URI").unwrap_or(defaults.api_base_uri),
            connect_timeout_ms: env_or("REDIS_CONNECT_TIMEOUT_MS", defaults.connect_timeout_ms),
            max_retries: env_or("REDIS_MAX_RETRIES", defaults.max_retries),
            clear_pattern: env::var("CACHE_CLEAR_PATTERN").unwrap_or(defaults.clear_pattern),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: "redis://localhost:6379".to_string(),
            backend: StoreBackend::Redis,
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            api_base_uri: "/api".to_string(),
            connect_timeout_ms: 5000,
            max_retries: 3,
            clear_pattern: "*".to_string(),
        }
    }
}

// 读取环境变量，缺失时使用默认值，格式错误时告警并回退
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value for {}: {:?}, using default", name, raw);
            default
        }),
        Err(_) => default,
    }
}
