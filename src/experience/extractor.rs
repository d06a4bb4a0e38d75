//! Date-range scanning over raw CV text
//!
//! Finds occurrences like "Jan 2015 - Dec 2017", "Mar 2018 - 2020" or
//! "Jun 2021 - Present" and normalizes each one to a pair of calendar
//! dates. Syntactic matching and date validation are separate stages:
//! the regex finds candidate fragments, normalization turns them into
//! dates or drops them.

use crate::config::EndYearPolicy;
use chrono::{Local, NaiveDate};
use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Month name + 4-digit year, a dash run, then a month/year, a bare year
/// or "Present". Month names are matched case-insensitively from their
/// first three letters, so "Sep", "Sept" and "September" all hit.
static DATE_RANGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*[\s,]+(\d{4})\s*[-–]+\s*(?:(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*[\s,]+(\d{4})|(Present)|(\d{4}))",
    )
    .expect("valid regex")
});

/// One contiguous period of claimed work experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Returns `None` when the pair is inverted.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }
}

/// Scans text for date-range patterns and yields normalized `DateRange`s.
///
/// Pure with respect to its input: the only ambient value is the date
/// "Present" resolves to, which defaults to today and can be pinned for
/// deterministic runs.
pub struct IntervalExtractor {
    reference_date: NaiveDate,
    end_year_policy: EndYearPolicy,
}

impl Default for IntervalExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl IntervalExtractor {
    pub fn new() -> Self {
        Self {
            reference_date: Local::now().date_naive(),
            end_year_policy: EndYearPolicy::StartMonth,
        }
    }

    /// Pin the date "Present" resolves to.
    pub fn with_reference_date(mut self, reference_date: NaiveDate) -> Self {
        self.reference_date = reference_date;
        self
    }

    pub fn with_end_year_policy(mut self, policy: EndYearPolicy) -> Self {
        self.end_year_policy = policy;
        self
    }

    /// Collect every parseable date range in the text, in match order.
    ///
    /// Fragments that match the pattern but do not resolve to a valid
    /// start/end pair are dropped without error; a CV with no readable
    /// history is a normal input, not a failure.
    pub fn extract(&self, text: &str) -> Vec<DateRange> {
        let mut ranges = Vec::new();

        for caps in DATE_RANGE_PATTERN.captures_iter(text) {
            match self.normalize_match(&caps) {
                Some(range) => ranges.push(range),
                None => debug!("Dropping unparseable date range: {:?}", &caps[0]),
            }
        }

        ranges
    }

    fn normalize_match(&self, caps: &Captures) -> Option<DateRange> {
        let start_month = month_name_to_number(caps.get(1)?.as_str())?;
        let start_year: i32 = caps.get(2)?.as_str().parse().ok()?;
        let start = NaiveDate::from_ymd_opt(start_year, start_month, 1)?;

        let end = if caps.get(5).is_some() {
            // "Present"
            self.reference_date
        } else if let (Some(month), Some(year)) = (caps.get(3), caps.get(4)) {
            let end_month = month_name_to_number(month.as_str())?;
            let end_year: i32 = year.as_str().parse().ok()?;
            NaiveDate::from_ymd_opt(end_year, end_month, 1)?
        } else {
            // Bare end year; the month comes from the configured policy.
            let end_year: i32 = caps.get(6)?.as_str().parse().ok()?;
            let end_month = match self.end_year_policy {
                EndYearPolicy::StartMonth => start_month,
                EndYearPolicy::December => 12,
            };
            NaiveDate::from_ymd_opt(end_year, end_month, 1)?
        };

        DateRange::new(start, end)
    }
}

fn month_name_to_number(name: &str) -> Option<u32> {
    match name.to_lowercase().as_str() {
        "january" | "jan" => Some(1),
        "february" | "feb" => Some(2),
        "march" | "mar" => Some(3),
        "april" | "apr" => Some(4),
        "may" => Some(5),
        "june" | "jun" => Some(6),
        "july" | "jul" => Some(7),
        "august" | "aug" => Some(8),
        "september" | "sep" | "sept" => Some(9),
        "october" | "oct" => Some(10),
        "november" | "nov" => Some(11),
        "december" | "dec" => Some(12),
        _ => None,
    }
}
