// Core layer - configuration and rendering helpers
pub mod core;

// Features layer - all feature modules
pub mod features;

// Re-export core config for convenience
pub use core::RateLimitConfig;

// Re-export feature items
pub use features::{InteractionRateLimiter, RateLimitCheck, UserId, UserRateLimit};
