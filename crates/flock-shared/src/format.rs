//! Display helpers for timestamps and large counts.

/// Relative age of a timestamp: "now", "5m", "3h", "2d".
pub fn time_ago(now_ms: i64, created_ms: i64) -> String {
    let diff = (now_ms - created_ms).max(0);
    let minutes = diff / 60_000;
    let hours = diff / 3_600_000;
    let days = diff / 86_400_000;

    if minutes < 1 {
        "now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m")
    } else if hours < 24 {
        format!("{hours}h")
    } else {
        format!("{days}d")
    }
}

/// Compact count: 999 -> "999", 45_200 -> "45K", 2_400_000 -> "2.4M".
pub fn compact_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.0}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_ago_buckets() {
        let now = 100 * 86_400_000;
        assert_eq!(time_ago(now, now - 30_000), "now");
        assert_eq!(time_ago(now, now - 5 * 60_000), "5m");
        assert_eq!(time_ago(now, now - 3 * 3_600_000), "3h");
        assert_eq!(time_ago(now, now - 2 * 86_400_000), "2d");
    }

    #[test]
    fn time_ago_clamps_future_timestamps() {
        assert_eq!(time_ago(1_000, 2_000), "now");
    }

    #[test]
    fn compact_count_thresholds() {
        assert_eq!(compact_count(999), "999");
        assert_eq!(compact_count(45_200), "45K");
        assert_eq!(compact_count(2_400_000), "2.4M");
    }
}
