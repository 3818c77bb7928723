use chrono::{DateTime, SecondsFormat, Utc};

const BYTE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// 把字节数换算成可读的字符串，最多保留两位小数（去掉末尾的 0）
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{} {}", trim_decimal(value), BYTE_UNITS[unit])
}

/// 百分比，固定两位小数并带上百分号
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// ISO 8601 时间戳，精确到毫秒
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn trim_decimal(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 Bytes");
        assert_eq!(format_bytes(512), "512 Bytes");
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(104_857_600), "100 MB");
        assert_eq!(format_bytes(1_288_490_189), "1.2 GB");
        // 超过 GB 仍以 GB 表示
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024 * 1024), "5120 GB");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(70.0), "70.00%");
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(format_percent(66.666_666), "66.67%");
    }

    #[test]
    fn test_iso_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 2, 15, 8, 30, 0).unwrap();
        assert_eq!(iso_timestamp(at), "2024-02-15T08:30:00.000Z");
    }

    proptest! {
        #[test]
        fn prop_format_bytes_picks_smallest_fitting_unit(bytes in 1u64..(1u64 << 40)) {
            let formatted = format_bytes(bytes);
            let (number, unit) = formatted.split_once(' ').unwrap();
            let number: f64 = number.parse().unwrap();

            prop_assert!(BYTE_UNITS.contains(&unit));
            prop_assert!(number > 0.0);
            if unit != "GB" {
                // 四舍五入到两位小数后最多为 1024
                prop_assert!(number <= 1024.0);
            }
        }
    }
}
