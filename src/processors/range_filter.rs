use crate::error::{ProcessingError, Result};
use crate::models::UsageRecord;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

/// Inclusive date range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(ProcessingError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn num_days(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_days() + 1
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Earliest and latest date of a table, `None` when it is empty.
pub fn date_bounds<R: UsageRecord>(records: &[R]) -> Option<DateRange> {
    let start = records.iter().map(|r| r.date()).min()?;
    let end = records.iter().map(|r| r.date()).max()?;
    Some(DateRange { start, end })
}

pub struct RangeFilter;

impl RangeFilter {
    /// Rows dated within `[start, end]`, in table order.
    pub fn filter<R: UsageRecord>(
        records: &[R],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<&R>> {
        let range = DateRange::new(start, end)?;
        Ok(Self::filter_range(records, &range))
    }

    pub fn filter_range<'a, R: UsageRecord>(records: &'a [R], range: &DateRange) -> Vec<&'a R> {
        let selected: Vec<&R> = records
            .iter()
            .filter(|r| range.contains(r.date()))
            .collect();

        debug!(
            range = %range,
            total = records.len(),
            selected = selected.len(),
            "filtered records"
        );
        selected
    }
}
