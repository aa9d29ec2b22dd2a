//! # Feature: Interaction Rate Limiting
//!
//! Gates how often a user may trigger interactive components (button clicks).
//! Uses DashMap for thread-safe concurrent access and tokio timers for the
//! delayed reset/cooldown actions. Every per-user value is replaced wholesale
//! on update so concurrent writers never merge partial state.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial release with per-user usage tracking and cooldown timers

use std::sync::Arc;
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use log::{debug, error};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};

use crate::core::config::RateLimitConfig;

/// Stable user identity as delivered by the platform client.
pub type UserId = u64;

/// Per-user rate limit record. Immutable per update: transitions store a new
/// value rather than mutating fields in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserRateLimit {
    /// Events observed in the current tracking window.
    pub usage: u32,
    /// `Some(t)` blocks the user until `t`; `None` means not limited.
    pub rate_limit_end: Option<Instant>,
}

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitCheck {
    /// The interaction may proceed.
    Allowed,
    /// The user is blocked; `remaining` is the time left until the block ends.
    /// Callers render this however the platform expects (see `core::response`).
    Limited { remaining: Duration },
}

impl RateLimitCheck {
    pub fn is_limited(&self) -> bool {
        matches!(self, RateLimitCheck::Limited { .. })
    }
}

/// Process-wide interaction rate limiter keyed by user ID.
///
/// Cheap to clone; clones share the same state table and timers.
#[derive(Clone)]
pub struct InteractionRateLimiter {
    shared: Arc<Shared>,
}

struct Shared {
    config: RateLimitConfig,
    entries: DashMap<UserId, UserRateLimit>,
    reset_timers: DashMap<UserId, JoinHandle<()>>,
    cooldown_timers: DashMap<UserId, JoinHandle<()>>,
}

impl InteractionRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        InteractionRateLimiter {
            shared: Arc::new(Shared {
                config,
                entries: DashMap::new(),
                reset_timers: DashMap::new(),
                cooldown_timers: DashMap::new(),
            }),
        }
    }

    /// Record one interaction event for `user_id` and report whether it may
    /// proceed. `now` is injected so callers and tests control the clock.
    ///
    /// Safe to call concurrently for the same and different users. The call
    /// that crosses `max_events` is itself still allowed; only subsequent
    /// calls are blocked. A missed increment under a same-user race is
    /// tolerated: this is an abuse heuristic, not a ledger.
    pub async fn check_and_record(&self, user_id: UserId, now: Instant) -> RateLimitCheck {
        let current = match self.shared.entries.entry(user_id) {
            Entry::Vacant(slot) => {
                slot.insert(UserRateLimit {
                    usage: 1,
                    rate_limit_end: None,
                });
                self.schedule_reset(user_id);
                return RateLimitCheck::Allowed;
            }
            Entry::Occupied(mut slot) => {
                let prior = *slot.get();
                // Usage is frozen while a rate limit is active.
                let updated = match prior.rate_limit_end {
                    None => UserRateLimit {
                        usage: prior.usage + 1,
                        ..prior
                    },
                    Some(_) => prior,
                };
                slot.insert(updated);
                updated
            }
        };

        match current.rate_limit_end {
            None => {
                if current.usage == 1 {
                    // A zero-usage entry left behind by a fired reset action is
                    // equivalent to no entry, so this event starts a new
                    // tracking window of its own.
                    self.schedule_reset(user_id);
                }
                if current.usage >= self.shared.config.max_events {
                    let end = now + self.shared.config.cooldown;
                    self.shared.entries.alter(&user_id, |_, prior| UserRateLimit {
                        rate_limit_end: Some(end),
                        ..prior
                    });
                    self.schedule_cooldown(user_id);
                    debug!(
                        "user {user_id} hit {} events, rate limited for {:?}",
                        current.usage, self.shared.config.cooldown
                    );
                }
                RateLimitCheck::Allowed
            }
            Some(end) => {
                if now > end {
                    self.recover_overdue(user_id, now, end);
                    RateLimitCheck::Allowed
                } else {
                    RateLimitCheck::Limited {
                        remaining: end - now,
                    }
                }
            }
        }
    }

    /// Number of users with a live entry in the state table.
    pub fn tracked_users(&self) -> usize {
        self.shared.entries.len()
    }

    /// Abort all pending timers and drop all state. For clean bot shutdown.
    pub fn shutdown(&self) {
        for timer in self.shared.reset_timers.iter() {
            timer.value().abort();
        }
        for timer in self.shared.cooldown_timers.iter() {
            timer.value().abort();
        }
        self.shared.reset_timers.clear();
        self.shared.cooldown_timers.clear();
        self.shared.entries.clear();
    }

    /// Schedule the reset action: after one tracking window, zero the user's
    /// usage count unless a rate limit became active in the meantime.
    fn schedule_reset(&self, user_id: UserId) {
        let shared = Arc::clone(&self.shared);
        let window = self.shared.config.tracking_window;
        let handle = tokio::spawn(async move {
            sleep(window).await;
            shared.entries.alter(&user_id, |_, prior| match prior.rate_limit_end {
                None => UserRateLimit {
                    usage: 0,
                    rate_limit_end: None,
                },
                Some(_) => prior,
            });
            shared.reset_timers.remove(&user_id);
            debug!("tracking window elapsed for user {user_id}, usage reset");
        });
        if let Some(stale) = self.shared.reset_timers.insert(user_id, handle) {
            // Abort is a no-op on completed tasks, so this is safe even if the
            // stale timer already fired.
            stale.abort();
        }
    }

    /// Schedule the cooldown action: once the rate limit period ends, remove
    /// the user's entry entirely.
    fn schedule_cooldown(&self, user_id: UserId) {
        let shared = Arc::clone(&self.shared);
        let cooldown = self.shared.config.cooldown;
        let handle = tokio::spawn(async move {
            sleep(cooldown).await;
            shared.entries.remove(&user_id);
            shared.cooldown_timers.remove(&user_id);
            debug!("cooldown elapsed for user {user_id}, entry removed");
        });
        if let Some(stale) = self.shared.cooldown_timers.insert(user_id, handle) {
            stale.abort();
        }
    }

    /// Self-healing path: a rate limit is past its end but the cooldown timer
    /// never removed the entry. Force-remove it, cancel the timer if it is
    /// somehow still pending, and log every anomaly. The caller sees a plain
    /// "allowed" result; bookkeeping failures must not block users.
    fn recover_overdue(&self, user_id: UserId, now: Instant, end: Instant) {
        let overrun = now - end;
        error!(
            "rate limit for user {user_id} expired {}ms ago but the entry was never removed",
            overrun.as_millis()
        );
        match self.shared.cooldown_timers.remove(&user_id) {
            None => {
                error!("no cooldown timer recorded for overdue rate limit on user {user_id}");
            }
            Some((_, handle)) => {
                if !handle.is_finished() {
                    handle.abort();
                    error!("forcibly cancelled a still-pending cooldown timer for user {user_id}");
                }
            }
        }
        self.shared.entries.remove(&user_id);
    }
}

impl Default for InteractionRateLimiter {
    fn default() -> Self {
        InteractionRateLimiter::new(RateLimitConfig::default())
    }
}
