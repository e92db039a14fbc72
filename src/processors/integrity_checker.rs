use crate::error::{ProcessingError, Result};
use crate::models::{Row, UsageRecord};
use crate::processors::Datasets;
use crate::utils::constants::HOURS_PER_DAY;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use validator::Validate;

#[derive(Debug, Clone, Serialize)]
pub struct IntegrityReport {
    pub daily_records: usize,
    pub hourly_records: usize,
    pub unknown_seasons: usize,
    pub unknown_weather: usize,
    pub incomplete_days: usize,
    pub violations: Vec<Violation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    pub table: &'static str,
    pub date: NaiveDate,
    pub hour: Option<u8>,
    pub violation_type: ViolationType,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViolationType {
    DuplicateDate,
    OutOfRange,
    UnknownCategory,
    MissingHours,
    TotalsMismatch,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn count(&self, violation_type: ViolationType) -> usize {
        self.violations
            .iter()
            .filter(|v| v.violation_type == violation_type)
            .count()
    }
}

pub struct IntegrityChecker;

impl IntegrityChecker {
    pub fn new() -> Self {
        Self
    }

    /// Reject a row whose user counts do not add up
    pub fn check_totals<C>(row: &Row<C>) -> Result<()> {
        if row.has_consistent_totals() {
            return Ok(());
        }
        Err(ProcessingError::InconsistentTotals {
            line: row.line,
            casual: row.casual_users,
            registered: row.registered_users,
            total: row.total_users,
        })
    }

    /// Check the loaded tables for data-quality problems that do not stop
    /// the load
    pub fn check(&self, datasets: &Datasets) -> IntegrityReport {
        let mut report = IntegrityReport {
            daily_records: datasets.daily().len(),
            hourly_records: datasets.hourly().len(),
            unknown_seasons: 0,
            unknown_weather: 0,
            incomplete_days: 0,
            violations: Vec::new(),
        };

        let mut seen_dates = BTreeSet::new();
        for record in datasets.daily() {
            if !seen_dates.insert(record.date) {
                report.violations.push(Violation {
                    table: "daily",
                    date: record.date,
                    hour: None,
                    violation_type: ViolationType::DuplicateDate,
                    details: format!("date {} appears more than once", record.date),
                });
            }
            self.check_categories(record, "daily", None, &mut report);
            if let Err(e) = record.validate() {
                report.violations.push(Violation {
                    table: "daily",
                    date: record.date,
                    hour: None,
                    violation_type: ViolationType::OutOfRange,
                    details: e.to_string(),
                });
            }
        }

        for record in datasets.hourly() {
            self.check_categories(record, "hourly", Some(record.hour), &mut report);
            if let Err(e) = record.validate() {
                report.violations.push(Violation {
                    table: "hourly",
                    date: record.date,
                    hour: Some(record.hour),
                    violation_type: ViolationType::OutOfRange,
                    details: e.to_string(),
                });
            }
        }

        self.check_hour_coverage(datasets, &mut report);
        self.check_daily_against_hourly(datasets, &mut report);

        report
    }

    fn check_categories<R: UsageRecord>(
        &self,
        record: &R,
        table: &'static str,
        hour: Option<u8>,
        report: &mut IntegrityReport,
    ) {
        let season = record.season_label();
        if !season.is_known() {
            report.unknown_seasons += 1;
            report.violations.push(Violation {
                table,
                date: record.date(),
                hour,
                violation_type: ViolationType::UnknownCategory,
                details: format!("season code {} has no label", season.code()),
            });
        }

        let weather = record.weather_label();
        if !weather.is_known() {
            report.unknown_weather += 1;
            report.violations.push(Violation {
                table,
                date: record.date(),
                hour,
                violation_type: ViolationType::UnknownCategory,
                details: format!("weather code {} has no label", weather.code()),
            });
        }
    }

    /// Days in the hourly table with fewer than 24 distinct hours
    fn check_hour_coverage(&self, datasets: &Datasets, report: &mut IntegrityReport) {
        let mut hours_by_date: BTreeMap<NaiveDate, BTreeSet<u8>> = BTreeMap::new();
        for record in datasets.hourly() {
            hours_by_date.entry(record.date).or_default().insert(record.hour);
        }

        for (date, hours) in hours_by_date {
            let missing = (HOURS_PER_DAY as usize).saturating_sub(hours.len());
            if missing > 0 {
                report.incomplete_days += 1;
                report.violations.push(Violation {
                    table: "hourly",
                    date,
                    hour: None,
                    violation_type: ViolationType::MissingHours,
                    details: format!("{} of 24 hours missing", missing),
                });
            }
        }
    }

    /// Daily totals should equal the sum of that day's hourly totals
    fn check_daily_against_hourly(&self, datasets: &Datasets, report: &mut IntegrityReport) {
        let mut hourly_sums: HashMap<NaiveDate, u64> = HashMap::new();
        for record in datasets.hourly() {
            *hourly_sums.entry(record.date).or_default() += record.total_users as u64;
        }

        for record in datasets.daily() {
            if let Some(&hourly) = hourly_sums.get(&record.date) {
                if hourly != record.total_users as u64 {
                    report.violations.push(Violation {
                        table: "daily",
                        date: record.date,
                        hour: None,
                        violation_type: ViolationType::TotalsMismatch,
                        details: format!(
                            "daily total {} differs from hourly sum {}",
                            record.total_users, hourly
                        ),
                    });
                }
            }
        }
    }

    /// Generate a summary report
    pub fn generate_summary(&self, report: &IntegrityReport) -> String {
        let mut summary = String::new();

        summary.push_str("=== Integrity Check Report ===\n");
        summary.push_str(&format!("Daily Records: {}\n", report.daily_records));
        summary.push_str(&format!("Hourly Records: {}\n", report.hourly_records));
        summary.push_str(&format!(
            "Unknown Codes: {} season, {} weather\n",
            report.unknown_seasons, report.unknown_weather
        ));
        summary.push_str(&format!(
            "Days With Missing Hours: {}\n",
            report.incomplete_days
        ));
        summary.push_str(&format!(
            "Duplicate Dates: {}\n",
            report.count(ViolationType::DuplicateDate)
        ));
        summary.push_str(&format!(
            "Range Violations: {}\n",
            report.count(ViolationType::OutOfRange)
        ));
        summary.push_str(&format!(
            "Daily/Hourly Total Mismatches: {}\n",
            report.count(ViolationType::TotalsMismatch)
        ));
        summary.push_str(&format!("\nViolations: {}\n", report.violations.len()));

        if !report.violations.is_empty() {
            summary.push_str("\nTop 10 Violations:\n");
            for (i, violation) in report.violations.iter().take(10).enumerate() {
                let at = match violation.hour {
                    Some(hour) => format!("{} {:02}:00", violation.date, hour),
                    None => violation.date.to_string(),
                };
                summary.push_str(&format!(
                    "  {}. [{}] {}: {}\n",
                    i + 1,
                    violation.table,
                    at,
                    violation.details
                ));
            }
        }

        summary
    }
}

impl Default for IntegrityChecker {
    fn default() -> Self {
        Self::new()
    }
}
