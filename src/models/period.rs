//! Closed date ranges used for disbursement weeks and overlap arithmetic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A closed date range `[start, end]`, both ends inclusive.
///
/// Disbursements cover one week; assignments carry expected and actual
/// intervals. Overlap between the two drives payment aggregation.
///
/// # Examples
///
/// ```
/// use taskwork_engine::models::DateRange;
/// use chrono::NaiveDate;
///
/// let week = DateRange::new(
///     NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 6, 8).unwrap(),
/// );
/// assert_eq!(week.days(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range.
    pub start: NaiveDate,
    /// Last day of the range.
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new range. `start` and `end` may be equal (a single day).
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of days in the range, counting both endpoints.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Returns the intersection with `other`, or `None` when the ranges
    /// do not share at least one day.
    pub fn overlap(&self, other: &DateRange) -> Option<DateRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start <= end {
            Some(DateRange::new(start, end))
        } else {
            None
        }
    }
}
