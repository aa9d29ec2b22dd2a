//! # Rate Limiting Feature
//!
//! Prevents interaction spam with per-user event limits and cooldowns.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod limiter;

pub use limiter::{InteractionRateLimiter, RateLimitCheck, UserId, UserRateLimit};
