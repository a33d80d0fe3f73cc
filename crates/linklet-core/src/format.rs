//! Display formatting for timestamps and remaining validity.

use jiff::{SignedDuration, Timestamp};

/// Renders a timestamp for display, UTC wall-clock.
pub fn format_timestamp(ts: Timestamp) -> String {
    ts.strftime("%Y-%m-%d %H:%M:%S").to_string()
}

/// Renders the time left on a link as a coarse human-readable bucket
/// ("2d 3h", "1h 5m", "12m"), or "Expired" once the duration is
/// non-positive.
pub fn format_remaining(remaining: SignedDuration) -> String {
    if remaining <= SignedDuration::ZERO {
        return "Expired".to_owned();
    }

    let minutes = remaining.as_mins();
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d {}h", days, hours % 24)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else {
        format!("{}m", minutes)
    }
}
