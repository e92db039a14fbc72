use crate::error::{ProcessingError, Result};
use crate::models::{DailyRecord, HourlyRecord};
use crate::processors::range_filter::{date_bounds, DateRange, RangeFilter};
use crate::processors::{
    Granularity, IntegrityChecker, LabelMapper, SchemaNormalizer, TimeBucketer, UnitDenormalizer,
};
use crate::readers::{RawTable, TableReader};
use crate::utils::progress::ProgressReporter;
use std::path::Path;
use tracing::{info, instrument};

/// The two canonical tables, immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    daily: Vec<DailyRecord>,
    hourly: Vec<HourlyRecord>,
}

/// Borrowed rows of both tables inside one date range.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    pub range: DateRange,
    pub daily: Vec<&'a DailyRecord>,
    pub hourly: Vec<&'a HourlyRecord>,
}

impl FilteredView<'_> {
    pub fn is_empty(&self) -> bool {
        self.daily.is_empty() && self.hourly.is_empty()
    }
}

impl Datasets {
    pub fn new(daily: Vec<DailyRecord>, hourly: Vec<HourlyRecord>) -> Self {
        Self { daily, hourly }
    }

    pub fn daily(&self) -> &[DailyRecord] {
        &self.daily
    }

    pub fn hourly(&self) -> &[HourlyRecord] {
        &self.hourly
    }

    /// Date bounds of the daily table, the default selection range
    pub fn date_bounds(&self) -> Option<DateRange> {
        date_bounds(&self.daily)
    }

    pub fn filter(&self, range: &DateRange) -> FilteredView<'_> {
        FilteredView {
            range: *range,
            daily: RangeFilter::filter_range(&self.daily, range),
            hourly: RangeFilter::filter_range(&self.hourly, range),
        }
    }
}

pub struct DatasetLoader {
    reader: TableReader,
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self {
            reader: TableReader::new(),
        }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self {
            reader: TableReader::with_mmap(use_mmap),
        }
    }

    /// Read and transform both tables; the two files are processed in
    /// parallel.
    pub fn load(
        &self,
        day_path: &Path,
        hour_path: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<Datasets> {
        if let Some(p) = progress {
            p.set_message("Loading daily and hourly tables...");
        }

        let (daily, hourly) = rayon::join(|| self.load_daily(day_path), || self.load_hourly(hour_path));
        let datasets = Datasets::new(daily?, hourly?);

        if let Some(p) = progress {
            p.finish_with_message(&format!(
                "Loaded {} daily and {} hourly records",
                datasets.daily.len(),
                datasets.hourly.len()
            ));
        }

        Ok(datasets)
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load_daily(&self, path: &Path) -> Result<Vec<DailyRecord>> {
        let raw = self.reader.read(path)?;
        Self::build_daily(&raw)
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load_hourly(&self, path: &Path) -> Result<Vec<HourlyRecord>> {
        let raw = self.reader.read(path)?;
        Self::build_hourly(&raw)
    }

    pub fn build_daily(raw: &RawTable) -> Result<Vec<DailyRecord>> {
        let rows = SchemaNormalizer::new(Granularity::Daily).normalize(raw)?;
        let mut mapper = LabelMapper::new();
        let mut records = Vec::with_capacity(rows.len());

        for row in rows {
            IntegrityChecker::check_totals(&row)?;
            let row = UnitDenormalizer::denormalize_row(row);
            let labels = mapper.label_row(&row);
            records.push(DailyRecord::new(row, labels));
        }

        mapper.report("daily");
        info!(records = records.len(), "built daily table");
        Ok(records)
    }

    pub fn build_hourly(raw: &RawTable) -> Result<Vec<HourlyRecord>> {
        let rows = SchemaNormalizer::new(Granularity::Hourly).normalize(raw)?;
        let mut mapper = LabelMapper::new();
        let mut records = Vec::with_capacity(rows.len());

        for row in rows {
            IntegrityChecker::check_totals(&row)?;
            let raw_hour = row.hour.ok_or(ProcessingError::MissingColumn {
                raw: "hr",
                semantic: "hour",
            })?;
            let (hour, time_category) = TimeBucketer::bucket(raw_hour, row.line)?;
            let row = UnitDenormalizer::denormalize_row(row);
            let labels = mapper.label_row(&row);
            records.push(HourlyRecord::new(row, hour, labels, time_category));
        }

        mapper.report("hourly");
        info!(records = records.len(), "built hourly table");
        Ok(records)
    }
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}
