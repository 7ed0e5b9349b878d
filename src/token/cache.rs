use std::time::{Duration, Instant};

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

/// Serializable view of the cached token, for diagnostics and tests.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenSnapshot {
    pub value: String,
    pub fetched_at: Timestamp,
    pub expires_at: Timestamp,
}

/// An access token together with the moment it was obtained.
///
/// Expiry is never scheduled; callers compare against the validity window
/// whenever they read the token.
#[derive(Clone, Debug)]
pub struct CachedToken {
    value: String,
    fetched_at: Instant,
    fetched_at_wall: Timestamp,
}

impl CachedToken {
    pub fn new(value: String) -> Self {
        Self::fetched_at(value, Instant::now(), Timestamp::now())
    }

    pub fn fetched_at(value: String, at: Instant, wall: Timestamp) -> Self {
        Self {
            value,
            fetched_at: at,
            fetched_at_wall: wall,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.fetched_at)
    }

    /// True while less than `ttl` has passed since the fetch.
    pub fn is_valid(&self, now: Instant, ttl: Duration) -> bool {
        !self.value.is_empty() && self.age(now) < ttl
    }

    pub fn remaining(&self, now: Instant, ttl: Duration) -> Option<Duration> {
        ttl.checked_sub(self.age(now)).filter(|d| !d.is_zero())
    }

    pub fn to_snapshot(&self, ttl: Duration) -> TokenSnapshot {
        let expires_at = SignedDuration::try_from(ttl)
            .ok()
            .and_then(|ttl| self.fetched_at_wall.checked_add(ttl).ok())
            .unwrap_or(Timestamp::MAX);
        TokenSnapshot {
            value: self.value.clone(),
            fetched_at: self.fetched_at_wall,
            expires_at,
        }
    }
}
