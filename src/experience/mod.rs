//! Experience-period extraction and merging engine
//!
//! The deterministic half of CV processing: scan raw text for date
//! ranges, merge overlapping or near-adjacent periods, and sum the
//! disjoint remainder into a total duration. Runs once per document,
//! owns no shared state, and never fails; unreadable history simply
//! produces an empty summary.

pub mod extractor;
pub mod merger;

pub use extractor::{DateRange, IntervalExtractor};
pub use merger::IntervalMerger;

use crate::config::ExtractionConfig;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Everything the engine derives from one document's text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceSummary {
    /// Date ranges as found, in match order.
    pub raw_periods: Vec<DateRange>,
    /// Coalesced periods, ascending and disjoint.
    pub merged_periods: Vec<DateRange>,
    /// Formatted "N years M months" total over the merged periods.
    pub total: String,
}

/// Composes the extractor and merger over a single text blob.
pub struct ExperienceAnalyzer {
    extractor: IntervalExtractor,
    merger: IntervalMerger,
}

impl Default for ExperienceAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperienceAnalyzer {
    pub fn new() -> Self {
        Self {
            extractor: IntervalExtractor::new(),
            merger: IntervalMerger::new(),
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            extractor: IntervalExtractor::new().with_end_year_policy(config.end_year_policy),
            merger: IntervalMerger::with_grace_months(config.grace_months),
        }
    }

    /// Pin the date "Present" resolves to.
    pub fn with_reference_date(mut self, reference_date: NaiveDate) -> Self {
        self.extractor = self.extractor.with_reference_date(reference_date);
        self
    }

    pub fn analyze(&self, text: &str) -> ExperienceSummary {
        let raw_periods = self.extractor.extract(text);
        let merged_periods = self.merger.merge(&raw_periods);
        let total = merger::total_experience(&merged_periods);

        ExperienceSummary {
            raw_periods,
            merged_periods,
            total,
        }
    }
}
