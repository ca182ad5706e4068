//! Half-open stay interval `[check_in, check_out)`
//!
//! Standard hospitality semantics: a checkout on day N and a new check-in on
//! day N do not overlap (the room turns over same-day). All instants are
//! timezone-normalized UTC.

use chrono::{DateTime, Utc};

use crate::shared::errors::DomainError;
use crate::domain::repositories::DomainResult;

/// A validated half-open date range. `check_out` is always strictly after
/// `check_in`; construction is the only way to obtain one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
}

impl DateRange {
    pub fn new(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> DomainResult<Self> {
        if check_out <= check_in {
            return Err(DomainError::Validation(format!(
                "check_out ({}) must be after check_in ({})",
                check_out, check_in
            )));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> DateTime<Utc> {
        self.check_in
    }

    pub fn check_out(&self) -> DateTime<Utc> {
        self.check_out
    }

    /// Two half-open ranges overlap iff each starts before the other ends.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    /// Whether `instant` falls inside the range. Half-open: the check-out
    /// instant itself is not contained.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.check_in <= instant && instant < self.check_out
    }

    /// Whether the whole stay is in the past at `now`.
    pub fn ended_by(&self, now: DateTime<Utc>) -> bool {
        self.check_out <= now
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.check_in, self.check_out)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, 0, 0, 0).unwrap()
    }

    fn range(from: u32, to: u32) -> DateRange {
        DateRange::new(day(from), day(to)).unwrap()
    }

    #[test]
    fn rejects_inverted_range() {
        assert!(DateRange::new(day(10), day(3)).is_err());
    }

    #[test]
    fn rejects_zero_length_range() {
        assert!(DateRange::new(day(5), day(5)).is_err());
    }

    #[test]
    fn overlapping_ranges_overlap() {
        assert!(range(1, 5).overlaps(&range(3, 6)));
        assert!(range(3, 6).overlaps(&range(1, 5)));
        // containment is overlap too
        assert!(range(1, 10).overlaps(&range(4, 5)));
        assert!(range(4, 5).overlaps(&range(1, 10)));
        // identical ranges
        assert!(range(2, 4).overlaps(&range(2, 4)));
    }

    #[test]
    fn disjoint_ranges_do_not_overlap() {
        assert!(!range(1, 3).overlaps(&range(10, 12)));
        assert!(!range(10, 12).overlaps(&range(1, 3)));
    }

    #[test]
    fn same_day_turnover_does_not_overlap() {
        // checkout on day 5, next check-in on day 5
        assert!(!range(1, 5).overlaps(&range(5, 7)));
        assert!(!range(5, 7).overlaps(&range(1, 5)));
    }

    #[test]
    fn contains_is_half_open() {
        let r = range(2, 6);
        assert!(r.contains(day(2)));
        assert!(r.contains(day(4)));
        assert!(!r.contains(day(6)));
        assert!(!r.contains(day(1)));
    }

    #[test]
    fn ended_by_checkout_instant() {
        let r = range(2, 6);
        assert!(!r.ended_by(day(5)));
        assert!(r.ended_by(day(6)));
        assert!(r.ended_by(day(7)));
    }

    #[test]
    fn nights_counts_days() {
        assert_eq!(range(1, 5).nights(), 4);
        assert_eq!(range(4, 5).nights(), 1);
    }
}
