//! # Features Layer
//!
//! Feature modules of the interaction guard.

pub mod rate_limiting;

pub use rate_limiting::{InteractionRateLimiter, RateLimitCheck, UserId, UserRateLimit};
