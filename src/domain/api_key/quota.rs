//! Quota window policy
//!
//! The consumption counter resets on a rolling 24-hour window measured from
//! the key's `last_reset`. The policy is a pure clock comparison evaluated on
//! every access, so a key idle for days still resets correctly on next use
//! without any background timer.

use chrono::{DateTime, Duration, Utc};

/// Length of the rolling quota window
pub fn reset_window() -> Duration {
    Duration::hours(24)
}

/// Whether `now` falls on or after the reset boundary following `last_reset`
pub fn due_for_reset(last_reset: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(last_reset) >= reset_window()
}

/// Latest `last_reset` value that is still due at `now`. Store
/// implementations condition their reset update on `last_reset <= cutoff` so
/// redundant concurrent attempts zero the counter at most once per window.
pub fn reset_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - reset_window()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_due_within_window() {
        let now = Utc::now();
        assert!(!due_for_reset(now - Duration::hours(23), now));
        assert!(!due_for_reset(now - Duration::minutes(1), now));
    }

    #[test]
    fn test_due_at_exact_boundary() {
        let now = Utc::now();
        assert!(due_for_reset(now - Duration::hours(24), now));
    }

    #[test]
    fn test_due_after_long_idle() {
        let now = Utc::now();
        assert!(due_for_reset(now - Duration::hours(25), now));
        assert!(due_for_reset(now - Duration::days(9), now));
    }

    #[test]
    fn test_future_last_reset_is_not_due() {
        // Clock skew between gateway instances must not trigger a reset
        let now = Utc::now();
        assert!(!due_for_reset(now + Duration::minutes(5), now));
    }

    #[test]
    fn test_cutoff_matches_due() {
        let now = Utc::now();
        let just_due = reset_cutoff(now);
        let not_due = just_due + Duration::seconds(1);

        assert!(due_for_reset(just_due, now));
        assert!(!due_for_reset(not_due, now));
    }
}
