//! Rendering helpers for "blocked" results
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! The limiter reports a remaining duration; how that reaches the user is the
//! caller's job. These helpers cover the two renderings bots actually use:
//! Discord relative-time markdown and plain humanized text.

use std::time::Duration;

use chrono::Utc;

/// Render the moment a rate limit ends as Discord relative-time markdown,
/// e.g. `<t:1735689600:R>` which clients display as "in 2 minutes".
pub fn discord_relative(remaining: Duration) -> String {
    let delta = chrono::Duration::from_std(remaining).unwrap_or_else(|_| chrono::Duration::zero());
    let end = Utc::now() + delta;
    format!("<t:{}:R>", end.timestamp())
}

/// Render a remaining duration as short human-readable text, e.g. "2m 30s".
/// Sub-second remainders round up so users never see "0s" while still blocked.
pub fn humanize(remaining: Duration) -> String {
    let total_secs = remaining.as_millis().div_ceil(1000) as u64;
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    if mins > 0 {
        format!("{mins}m {secs}s")
    } else {
        format!("{secs}s")
    }
}
