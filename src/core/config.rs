//! # Rate Limit Configuration
//!
//! YAML-based limiter configuration with schema validation.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Default number of events a user may trigger per tracking window.
pub const MAX_EVENTS: u32 = 5;
/// Default tracking window during which usage accumulates.
pub const TRACKING_WINDOW: Duration = Duration::from_millis(120_000);
/// Default cooldown applied once a user crosses the event threshold.
pub const COOLDOWN: Duration = Duration::from_millis(120_000);

/// Limiter tuning knobs. Fixed for the lifetime of a limiter instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Events allowed per tracking window before the cooldown kicks in.
    pub max_events: u32,
    /// Window during which a user's usage count accumulates.
    #[serde(rename = "tracking_window_ms", with = "duration_ms")]
    pub tracking_window: Duration,
    /// How long a user stays blocked after crossing the threshold.
    #[serde(rename = "cooldown_ms", with = "duration_ms")]
    pub cooldown: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        RateLimitConfig {
            max_events: MAX_EVENTS,
            tracking_window: TRACKING_WINDOW,
            cooldown: COOLDOWN,
        }
    }
}

impl RateLimitConfig {
    /// Load limiter configuration from a YAML file
    pub fn load(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: RateLimitConfig = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_events == 0 {
            return Err(anyhow::anyhow!("max_events must be at least 1"));
        }
        if self.tracking_window.is_zero() {
            return Err(anyhow::anyhow!("tracking_window_ms must be non-zero"));
        }
        if self.cooldown.is_zero() {
            return Err(anyhow::anyhow!("cooldown_ms must be non-zero"));
        }
        Ok(())
    }
}

/// Durations are written as integer milliseconds in config files.
mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
