//! Elapsed/duration display formatting

/// Format a duration in seconds as `M:SS`.
///
/// Minutes carry no leading zero, seconds are zero-padded to two digits.
/// Both components are floored, so `59.9` renders as `0:59`.
///
/// Non-finite input (`NaN` before metadata is known, `inf` for unbounded
/// streams) renders as `0:00`. Negative input is clamped to zero.
pub fn format_time(secs: f64) -> String {
    let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };

    let total = secs.floor() as u64;

    format!("{}:{:02}", total / 60, total % 60)
}
