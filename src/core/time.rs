/// Formats a media position as `MM:SS`, or `H:MM:SS` once past the hour.
pub fn format_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;

    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{:02}:{:02}", m, s)
    }
}

/// Display for an optional loop bound.
pub fn format_bound(bound: Option<f64>) -> String {
    bound.map(format_timestamp).unwrap_or_else(|| "--:--".to_string())
}
