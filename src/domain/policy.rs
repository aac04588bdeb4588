//! Retention thresholds and classification rules.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use super::error::DomainError;

/// Validated retention configuration.
///
/// A configured threshold of zero means the feature is disabled, not "zero
/// tolerance"; `try_new` normalizes zeros to `None`. At least one threshold
/// must be enabled, otherwise construction fails and no sweep can start.
#[derive(Debug, Clone)]
pub struct RetentionPolicy {
    max_reposts: Option<u32>,
    stale_limit_days: Option<u32>,
    protected_domains: BTreeSet<String>,
}

impl RetentionPolicy {
    pub fn try_new(
        max_reposts: u32,
        stale_limit_days: u32,
        protected_domains: impl IntoIterator<Item = String>,
    ) -> Result<Self, DomainError> {
        if max_reposts == 0 && stale_limit_days == 0 {
            return Err(DomainError::NoThresholdEnabled);
        }
        Ok(Self {
            max_reposts: (max_reposts > 0).then_some(max_reposts),
            stale_limit_days: (stale_limit_days > 0).then_some(stale_limit_days),
            protected_domains: protected_domains
                .into_iter()
                .map(|domain| domain.trim().to_ascii_lowercase())
                .filter(|domain| !domain.is_empty())
                .collect(),
        })
    }

    /// True iff the stale limit is enabled and the whole-day age is at or
    /// past it.
    pub fn is_stale(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self.stale_limit_days {
            Some(limit) => (now - created_at).num_days() >= i64::from(limit),
            None => false,
        }
    }

    /// True iff the repost limit is enabled and the count is strictly above
    /// it. A post sitting exactly at the limit is retained.
    pub fn is_viral(&self, repost_count: u64) -> bool {
        match self.max_reposts {
            Some(limit) => repost_count > u64::from(limit),
            None => false,
        }
    }

    /// True iff any of `domains` appears in the protected set,
    /// case-insensitively.
    pub fn touches_protected_domain<'a>(
        &self,
        domains: impl IntoIterator<Item = &'a str>,
    ) -> bool {
        if self.protected_domains.is_empty() {
            return false;
        }
        domains
            .into_iter()
            .any(|domain| self.protected_domains.contains(&domain.to_ascii_lowercase()))
    }

    pub fn max_reposts(&self) -> Option<u32> {
        self.max_reposts
    }

    pub fn stale_limit_days(&self) -> Option<u32> {
        self.stale_limit_days
    }

    pub fn protected_domains(&self) -> &BTreeSet<String> {
        &self.protected_domains
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn policy(max_reposts: u32, stale_limit_days: u32) -> RetentionPolicy {
        RetentionPolicy::try_new(max_reposts, stale_limit_days, Vec::new()).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn both_thresholds_disabled_is_rejected() {
        let result = RetentionPolicy::try_new(0, 0, Vec::new());
        assert!(matches!(result, Err(DomainError::NoThresholdEnabled)));
    }

    #[test]
    fn zero_normalizes_to_disabled() {
        let p = policy(0, 7);
        assert_eq!(p.max_reposts(), None);
        assert_eq!(p.stale_limit_days(), Some(7));

        let p = policy(100, 0);
        assert_eq!(p.max_reposts(), Some(100));
        assert_eq!(p.stale_limit_days(), None);
    }

    #[test]
    fn viral_is_strictly_greater_than_the_limit() {
        let p = policy(100, 0);
        assert!(!p.is_viral(99));
        assert!(!p.is_viral(100));
        assert!(p.is_viral(101));
    }

    #[test]
    fn disabled_repost_limit_never_flags_virality() {
        let p = policy(0, 7);
        assert!(!p.is_viral(0));
        assert!(!p.is_viral(u64::MAX));
    }

    #[test]
    fn stale_at_exactly_the_limit_day() {
        let p = policy(0, 2);
        let now = now();
        assert!(!p.is_stale(now - Duration::days(1), now));
        assert!(p.is_stale(now - Duration::days(2), now));
        assert!(p.is_stale(now - Duration::days(3), now));
    }

    #[test]
    fn stale_compares_whole_days() {
        let p = policy(0, 1);
        let now = now();
        // 23 hours is zero whole days
        assert!(!p.is_stale(now - Duration::hours(23), now));
        assert!(p.is_stale(now - Duration::hours(25), now));
    }

    #[test]
    fn disabled_stale_limit_never_flags_staleness() {
        let p = policy(100, 0);
        let now = now();
        assert!(!p.is_stale(now - Duration::days(10_000), now));
    }

    #[test]
    fn protected_domains_match_case_insensitively() {
        let p = RetentionPolicy::try_new(0, 7, vec!["Example.COM".to_string()]).unwrap();
        assert!(p.touches_protected_domain(["example.com"]));
        assert!(p.touches_protected_domain(["EXAMPLE.com"]));
        assert!(!p.touches_protected_domain(["example.org"]));
        assert!(!p.touches_protected_domain(std::iter::empty::<&str>()));
    }

    #[test]
    fn empty_protected_set_matches_nothing() {
        let p = policy(0, 7);
        assert!(!p.touches_protected_domain(["example.com"]));
    }
}
