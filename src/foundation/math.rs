/// Clamp into `[0, 1]`, mapping NaN to 0.
pub fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Format whole elapsed seconds as `MM:SS`.
///
/// Minutes are not wrapped at 60, so long timelines render as `75:00` rather than hours.
pub fn format_timestamp(seconds: f64) -> String {
    let whole = if seconds.is_finite() {
        seconds.max(0.0).floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", whole / 60, whole % 60)
}
