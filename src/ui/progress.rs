//! Progress line formatting.

use std::time::Duration;

/// Percentage of the run completed before step `index` of `total` starts.
pub fn progress_percent(index: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    (index as f64 / total as f64) * 100.0
}

/// Format a progress line as `[percent%] name`.
///
/// Returns `None` at exactly 100%, which would carry no information.
pub fn format_progress(percent: f64, name: &str) -> Option<String> {
    if (percent - 100.0).abs() < f64::EPSILON {
        return None;
    }
    Some(format!("[{}%] {}", percent.round() as u32, name))
}

/// Format a duration for human display.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs == 0 {
        format!("{}ms", millis)
    } else if secs < 60 {
        format!("{}.{}s", secs, millis / 100)
    } else {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    }
}
