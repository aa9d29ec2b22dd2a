//! # Core Module
//!
//! Configuration and caller-facing rendering helpers for the limiter.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod config;
pub mod response;

// Re-export commonly used items
pub use config::RateLimitConfig;
pub use response::{discord_relative, humanize};
