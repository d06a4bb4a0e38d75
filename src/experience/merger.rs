//! Interval merging and total-experience aggregation
//!
//! Consumes the raw date ranges found by the extractor, coalesces
//! overlapping or near-adjacent periods, and sums what remains into a
//! whole-months total.

use super::extractor::DateRange;
use chrono::{Datelike, Months, NaiveDate};

/// Single-pass interval merge with a grace window.
///
/// Input order does not matter; the output is ascending by start date,
/// disjoint, and no two intervals sit within the grace window of each
/// other. Ties on start date keep their original relative order.
pub struct IntervalMerger {
    grace_months: u32,
}

impl Default for IntervalMerger {
    fn default() -> Self {
        Self::new()
    }
}

impl IntervalMerger {
    pub fn new() -> Self {
        Self { grace_months: 1 }
    }

    pub fn with_grace_months(grace_months: u32) -> Self {
        Self { grace_months }
    }

    pub fn merge(&self, periods: &[DateRange]) -> Vec<DateRange> {
        let mut sorted = periods.to_vec();
        sorted.sort_by_key(|period| period.start);

        let mut merged: Vec<DateRange> = Vec::new();
        for candidate in sorted {
            if let Some(last) = merged.last_mut() {
                if candidate.start <= grace_cutoff(last.end, self.grace_months) {
                    // Overlapping or contiguous: extend the running interval.
                    last.end = last.end.max(candidate.end);
                    continue;
                }
            }
            merged.push(candidate);
        }

        merged
    }
}

/// Latest start date that still merges with an interval ending at `end`.
fn grace_cutoff(end: NaiveDate, grace_months: u32) -> NaiveDate {
    end.checked_add_months(Months::new(grace_months))
        .unwrap_or(NaiveDate::MAX)
}

/// Whole calendar months elapsed from `start` to `end`.
///
/// Month difference with a day borrow, the way date libraries report
/// "years and months between": Jan 1 to Mar 1 is 2 months, Jan 20 to
/// Mar 15 is 1 month.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let mut months = i64::from(end.year() - start.year()) * 12 + i64::from(end.month())
        - i64::from(start.month());
    if end.day() < start.day() {
        months -= 1;
    }
    months.max(0)
}

/// Sum the periods into a `"N years M months"` string.
///
/// An empty slice reports "0 years 0 months"; absence of parseable
/// history is a normal outcome.
pub fn total_experience(periods: &[DateRange]) -> String {
    let total_months: i64 = periods
        .iter()
        .map(|period| months_between(period.start, period.end))
        .sum();
    format!("{} years {} months", total_months / 12, total_months % 12)
}
