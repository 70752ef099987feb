//! API key record entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::UserId;

/// Durable record of an API key: the opaque secret callers present, the
/// identity that owns it, and the per-window quota accounting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeyRecord {
    /// The opaque secret presented by callers. Unique across all keys.
    key: String,
    /// Identity that owns this key. One key maps to exactly one owner.
    owner_user_id: UserId,
    /// A disabled key always fails authorization regardless of quota.
    is_valid: bool,
    /// Maximum calls permitted per reset window. Always positive.
    rate_limit: u32,
    /// Calls consumed within the current window. Zeroed on window rollover,
    /// never decremented otherwise.
    calls_made: u32,
    /// When `calls_made` was last zeroed.
    last_reset: DateTime<Utc>,
}

impl ApiKeyRecord {
    /// Create a fresh, enabled key record with an empty window
    pub fn new(key: impl Into<String>, owner_user_id: UserId, rate_limit: u32) -> Self {
        Self {
            key: key.into(),
            owner_user_id,
            is_valid: true,
            rate_limit: rate_limit.max(1),
            calls_made: 0,
            last_reset: Utc::now(),
        }
    }

    /// Rehydrate a record from stored fields
    pub fn from_parts(
        key: impl Into<String>,
        owner_user_id: UserId,
        is_valid: bool,
        rate_limit: u32,
        calls_made: u32,
        last_reset: DateTime<Utc>,
    ) -> Self {
        Self {
            key: key.into(),
            owner_user_id,
            is_valid,
            rate_limit,
            calls_made,
            last_reset,
        }
    }

    /// Mark the key disabled
    pub fn disabled(mut self) -> Self {
        self.is_valid = false;
        self
    }

    /// Set consumed calls (for seeding and tests)
    pub fn with_calls_made(mut self, calls_made: u32) -> Self {
        self.calls_made = calls_made;
        self
    }

    /// Set the last reset timestamp (for seeding and tests)
    pub fn with_last_reset(mut self, last_reset: DateTime<Utc>) -> Self {
        self.last_reset = last_reset;
        self
    }

    // Getters

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn owner_user_id(&self) -> UserId {
        self.owner_user_id
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn rate_limit(&self) -> u32 {
        self.rate_limit
    }

    pub fn calls_made(&self) -> u32 {
        self.calls_made
    }

    pub fn last_reset(&self) -> DateTime<Utc> {
        self.last_reset
    }

    /// Whether one more call fits in the current window
    pub fn under_limit(&self) -> bool {
        self.calls_made < self.rate_limit
    }

    // Mutators, used by store implementations only

    /// Zero the window counter and start a new window at `now`
    pub fn apply_reset(&mut self, now: DateTime<Utc>) {
        self.calls_made = 0;
        self.last_reset = now;
    }

    /// Account one permitted call
    pub fn record_call(&mut self) {
        self.calls_made += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_record_defaults() {
        let record = ApiKeyRecord::new("dh_live_abc123", UserId::new(1), 100);

        assert_eq!(record.key(), "dh_live_abc123");
        assert!(record.is_valid());
        assert_eq!(record.calls_made(), 0);
        assert_eq!(record.rate_limit(), 100);
        assert!(record.under_limit());
    }

    #[test]
    fn test_rate_limit_is_never_zero() {
        let record = ApiKeyRecord::new("dh_live_abc123", UserId::new(1), 0);
        assert_eq!(record.rate_limit(), 1);
    }

    #[test]
    fn test_under_limit_boundary() {
        let record = ApiKeyRecord::new("k", UserId::new(1), 2).with_calls_made(1);
        assert!(record.under_limit());

        let record = record.with_calls_made(2);
        assert!(!record.under_limit());
    }

    #[test]
    fn test_apply_reset() {
        let stale = Utc::now() - Duration::hours(30);
        let mut record = ApiKeyRecord::new("k", UserId::new(1), 5)
            .with_calls_made(5)
            .with_last_reset(stale);

        let now = Utc::now();
        record.apply_reset(now);

        assert_eq!(record.calls_made(), 0);
        assert_eq!(record.last_reset(), now);
    }

    #[test]
    fn test_record_call() {
        let mut record = ApiKeyRecord::new("k", UserId::new(1), 5);
        record.record_call();
        record.record_call();
        assert_eq!(record.calls_made(), 2);
    }

    #[test]
    fn test_disabled() {
        let record = ApiKeyRecord::new("k", UserId::new(1), 5).disabled();
        assert!(!record.is_valid());
    }
}
