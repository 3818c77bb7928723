use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::utils::{format_bytes, format_percent, iso_timestamp};

/// 存储未报告 maxmemory（或为 0，即不限制）时使用的上限：100 MiB
pub const DEFAULT_MAX_MEMORY: u64 = 100 * 1024 * 1024;

/// 内存占用严格超过该百分比时告警
pub const MEMORY_ALERT_PERCENT: u64 = 80;

/// 命中率低于该值时告警
pub const HIT_RATE_ALERT_PERCENT: f64 = 70.0;

/// 请求数不超过该值时不做命中率告警，样本太小
pub const HIT_RATE_MIN_REQUESTS: u64 = 100;

pub const CONNECTION_ALERT_THRESHOLD: u64 = 50;

const COMMAND_LATENCY_THRESHOLD: &str = "100ms";

/// INFO 命令返回的 `key:value` 字段
#[derive(Debug, Clone, Default)]
pub struct InfoMetrics {
    fields: HashMap<String, String>,
}

impl InfoMetrics {
    pub fn parse(raw: &str) -> Self {
        let fields = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once(':'))
            .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
            .collect();
        Self { fields }
    }

    /// 合并另一段 INFO 的字段，同名字段以后者为准
    pub fn merge(&mut self, other: InfoMetrics) {
        self.fields.extend(other.fields);
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.parse().ok())
    }
}

/// 计算快照所需的原始数据
#[derive(Debug, Clone, Default)]
pub struct StatsInputs {
    pub hits: u64,
    pub misses: u64,
    pub total_views: u64,
    pub info: InfoMetrics,
}

/// 命中率百分比；没有任何请求时为 0
pub fn hit_rate_percent(hits: u64, misses: u64) -> f64 {
    let total = hits.saturating_add(misses);
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64 * 100.0
    }
}

// 与展示值保持一致：先保留两位小数再比较
fn hit_rate_below_threshold(hit_rate: f64) -> bool {
    (hit_rate * 100.0).round() / 100.0 < HIT_RATE_ALERT_PERCENT
}

fn memory_over_threshold(used: u64, max: u64) -> bool {
    u128::from(used) * 100 > u128::from(max) * u128::from(MEMORY_ALERT_PERCENT)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
}

impl Alert {
    fn warning(message: String) -> Self {
        Self {
            level: AlertLevel::Warning,
            message,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HumanReadableMemory {
    pub used: String,
    pub max: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryMetrics {
    pub used: u64,
    pub max: u64,
    pub usage_percent: String,
    pub human_readable: HumanReadableMemory,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheMetrics {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: String,
    pub total_requests: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConnectionMetrics {
    pub current: u64,
    pub threshold: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewMetrics {
    pub total: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Metrics {
    pub memory: MemoryMetrics,
    pub cache: CacheMetrics,
    pub connections: ConnectionMetrics,
    pub views: ViewMetrics,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    pub memory_usage: String,
    pub cache_hit_rate: String,
    pub connection_count: u64,
    pub command_latency: String,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            memory_usage: format!("{}%", MEMORY_ALERT_PERCENT),
            cache_hit_rate: format!("{}%", HIT_RATE_ALERT_PERCENT),
            connection_count: CONNECTION_ALERT_THRESHOLD,
            command_latency: COMMAND_LATENCY_THRESHOLD.to_string(),
        }
    }
}

/// 监控快照，每次请求时重新计算，不做持久化
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub status: HealthStatus,
    pub timestamp: String,
    pub metrics: Metrics,
    pub alerts: Vec<Alert>,
    pub thresholds: Thresholds,
}

impl StatsSnapshot {
    pub fn compute(inputs: &StatsInputs, at: DateTime<Utc>) -> Self {
        let info = &inputs.info;
        let used = info.get_u64("used_memory").unwrap_or(0);
        let max = info
            .get_u64("maxmemory")
            .filter(|max| *max > 0)
            .unwrap_or(DEFAULT_MAX_MEMORY);
        let usage_percent = used as f64 / max as f64 * 100.0;

        let total_requests = inputs.hits.saturating_add(inputs.misses);
        let hit_rate = hit_rate_percent(inputs.hits, inputs.misses);
        let connected_clients = info.get_u64("connected_clients").unwrap_or(0);

        // 各条规则独立判断，按固定顺序输出
        let mut alerts = Vec::new();
        if memory_over_threshold(used, max) {
            alerts.push(Alert::warning(format!(
                "High memory usage: {}",
                format_percent(usage_percent)
            )));
        }
        if hit_rate_below_threshold(hit_rate) && total_requests > HIT_RATE_MIN_REQUESTS {
            alerts.push(Alert::warning(format!(
                "Low cache hit rate: {}",
                format_percent(hit_rate)
            )));
        }
        if connected_clients > CONNECTION_ALERT_THRESHOLD {
            alerts.push(Alert::warning(format!(
                "High connection count: {}",
                connected_clients
            )));
        }

        let status = if alerts.is_empty() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Warning
        };

        Self {
            status,
            timestamp: iso_timestamp(at),
            metrics: Metrics {
                memory: MemoryMetrics {
                    used,
                    max,
                    usage_percent: format_percent(usage_percent),
                    human_readable: HumanReadableMemory {
                        used: format_bytes(used),
                        max: format_bytes(max),
                    },
                },
                cache: CacheMetrics {
                    hits: inputs.hits,
                    misses: inputs.misses,
                    hit_rate: format_percent(hit_rate),
                    total_requests,
                },
                connections: ConnectionMetrics {
                    current: connected_clients,
                    threshold: CONNECTION_ALERT_THRESHOLD,
                },
                views: ViewMetrics {
                    total: inputs.total_views,
                },
            },
            alerts,
            thresholds: Thresholds::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn inputs(hits: u64, misses: u64, info: &str) -> StatsInputs {
        StatsInputs {
            hits,
            misses,
            total_views: 0,
            info: InfoMetrics::parse(info),
        }
    }

    fn snapshot(inputs: &StatsInputs) -> StatsSnapshot {
        StatsSnapshot::compute(inputs, Utc::now())
    }

    #[test]
    fn test_info_parse() {
        let raw = "# Memory\r\nused_memory:1048576\r\nused_memory_human:1.00M\r\n\r\nmaxmemory:0\r\n";
        let info = InfoMetrics::parse(raw);
        assert_eq!(info.get_u64("used_memory"), Some(1_048_576));
        assert_eq!(info.get("used_memory_human"), Some("1.00M"));
        assert_eq!(info.get_u64("maxmemory"), Some(0));
        assert_eq!(info.get("# Memory"), None);
    }

    #[test]
    fn test_info_merge() {
        let mut info = InfoMetrics::parse("used_memory:10");
        info.merge(InfoMetrics::parse("# Clients\nconnected_clients:7"));
        assert_eq!(info.get_u64("used_memory"), Some(10));
        assert_eq!(info.get_u64("connected_clients"), Some(7));
    }

    #[test]
    fn test_hit_rate() {
        assert_eq!(format_percent(hit_rate_percent(7, 3)), "70.00%");
        assert_eq!(format_percent(hit_rate_percent(0, 0)), "0.00%");
        assert_eq!(format_percent(hit_rate_percent(5, 0)), "100.00%");

        let snap = snapshot(&inputs(7, 3, ""));
        assert_eq!(snap.metrics.cache.hit_rate, "70.00%");
        assert_eq!(snap.metrics.cache.total_requests, 10);
    }

    #[test]
    fn test_small_sample_suppresses_hit_rate_alert() {
        let snap = snapshot(&inputs(0, 1, ""));
        assert_eq!(snap.metrics.cache.hit_rate, "0.00%");
        assert!(snap.alerts.is_empty());
        assert_eq!(snap.status, HealthStatus::Healthy);
    }

    #[test]
    fn test_low_hit_rate_alert() {
        let snap = snapshot(&inputs(10, 91, ""));
        assert_eq!(snap.alerts.len(), 1);
        assert_eq!(snap.alerts[0].message, "Low cache hit rate: 9.90%");
        assert_eq!(snap.status, HealthStatus::Warning);

        // 命中率正好 70% 不告警
        let snap = snapshot(&inputs(700, 300, ""));
        assert!(snap.alerts.is_empty());
    }

    #[test]
    fn test_hit_rate_alert_uses_displayed_rate() {
        // 69.996% 显示为 70.00%，不应告警
        let snap = snapshot(&inputs(69_996, 30_004, ""));
        assert_eq!(snap.metrics.cache.hit_rate, "70.00%");
        assert!(snap.alerts.is_empty());
        assert_eq!(snap.status, HealthStatus::Healthy);

        // 69.994% 显示为 69.99%，告警
        let snap = snapshot(&inputs(69_994, 30_006, ""));
        assert_eq!(snap.alerts.len(), 1);
        assert_eq!(snap.alerts[0].message, "Low cache hit rate: 69.99%");
    }

    #[test]
    fn test_memory_alert_boundary() {
        let exact = snapshot(&inputs(0, 0, "used_memory:8000\r\nmaxmemory:10000"));
        assert!(exact.alerts.is_empty());
        assert_eq!(exact.metrics.memory.usage_percent, "80.00%");

        let over = snapshot(&inputs(0, 0, "used_memory:8001\r\nmaxmemory:10000"));
        assert_eq!(over.alerts.len(), 1);
        assert_eq!(over.alerts[0].message, "High memory usage: 80.01%");
        assert_eq!(over.status, HealthStatus::Warning);
    }

    #[test]
    fn test_default_max_memory() {
        let snap = snapshot(&inputs(0, 0, "used_memory:1536"));
        assert_eq!(snap.metrics.memory.max, DEFAULT_MAX_MEMORY);
        assert_eq!(snap.metrics.memory.human_readable.used, "1.5 KB");
        assert_eq!(snap.metrics.memory.human_readable.max, "100 MB");

        // maxmemory:0 表示不限制，同样回退到默认值
        let snap = snapshot(&inputs(0, 0, "used_memory:1536\r\nmaxmemory:0"));
        assert_eq!(snap.metrics.memory.max, DEFAULT_MAX_MEMORY);
        assert!(snap.alerts.is_empty());
    }

    #[test]
    fn test_connection_alert() {
        let at_limit = snapshot(&inputs(0, 0, "connected_clients:50"));
        assert!(at_limit.alerts.is_empty());

        let over = snapshot(&inputs(0, 0, "connected_clients:51"));
        assert_eq!(over.alerts[0].message, "High connection count: 51");
    }

    #[test]
    fn test_alerts_keep_rule_order() {
        let snap = snapshot(&inputs(
            1,
            200,
            "used_memory:95\r\nmaxmemory:100\r\nconnected_clients:80",
        ));
        let messages: Vec<&str> = snap.alerts.iter().map(|a| a.message.as_str()).collect();
        assert_eq!(messages.len(), 3);
        assert!(messages[0].starts_with("High memory usage"));
        assert!(messages[1].starts_with("Low cache hit rate"));
        assert!(messages[2].starts_with("High connection count"));
    }

    #[test]
    fn test_snapshot_json_shape() {
        let mut stats = inputs(7, 3, "used_memory:1024\r\nconnected_clients:2");
        stats.total_views = 12;
        let json = serde_json::to_value(snapshot(&stats)).unwrap();

        assert_eq!(json["status"], "healthy");
        assert_eq!(json["metrics"]["memory"]["usagePercent"], "0.00%");
        assert_eq!(json["metrics"]["memory"]["humanReadable"]["used"], "1 KB");
        assert_eq!(json["metrics"]["cache"]["hitRate"], "70.00%");
        assert_eq!(json["metrics"]["cache"]["totalRequests"], 10);
        assert_eq!(json["metrics"]["connections"]["current"], 2);
        assert_eq!(json["metrics"]["views"]["total"], 12);
        assert_eq!(json["thresholds"]["memoryUsage"], "80%");
        assert_eq!(json["thresholds"]["cacheHitRate"], "70%");
        assert_eq!(json["thresholds"]["connectionCount"], 50);
        assert!(json["alerts"].as_array().unwrap().is_empty());
    }

    proptest! {
        #[test]
        fn prop_hit_rate_is_a_percentage(hits in 0u64..1_000_000, misses in 0u64..1_000_000) {
            let rate = hit_rate_percent(hits, misses);
            prop_assert!((0.0..=100.0).contains(&rate));
        }

        #[test]
        fn prop_status_tracks_alerts(
            hits in 0u64..500,
            misses in 0u64..500,
            used in 0u64..200,
            clients in 0u64..100,
        ) {
            let info = format!("used_memory:{}\r\nmaxmemory:100\r\nconnected_clients:{}", used, clients);
            let snap = snapshot(&inputs(hits, misses, &info));
            let expected = if snap.alerts.is_empty() { HealthStatus::Healthy } else { HealthStatus::Warning };
            prop_assert_eq!(snap.status, expected);
            prop_assert_eq!(snap.alerts.iter().any(|a| a.message.starts_with("High memory")), used > 80);
        }
    }
}
