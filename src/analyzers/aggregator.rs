use crate::error::{ProcessingError, Result};
use crate::models::{HourlyRecord, Season, TimeCategory, UsageRecord, WeatherSituation};
use crate::utils::constants::{HOURS_PER_DAY, WEEKDAY_ORDER};
use crate::utils::weekday_name;
use chrono::{NaiveDate, Weekday};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    CasualUsers,
    RegisteredUsers,
    TotalUsers,
}

impl Metric {
    pub fn value<R: UsageRecord + ?Sized>(&self, record: &R) -> u32 {
        match self {
            Metric::CasualUsers => record.casual_users(),
            Metric::RegisteredUsers => record.registered_users(),
            Metric::TotalUsers => record.total_users(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Metric::CasualUsers => "casual_users",
            Metric::RegisteredUsers => "registered_users",
            Metric::TotalUsers => "total_users",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reduction {
    Sum,
    Mean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    None,
    Season,
    Weather,
    HourAndWorkingDay,
    TimeCategory,
    DayOfWeek,
}

impl Grouping {
    pub fn name(&self) -> &'static str {
        match self {
            Grouping::None => "none",
            Grouping::Season => "season_label",
            Grouping::Weather => "weather_label",
            Grouping::HourAndWorkingDay => "hour,is_workingday",
            Grouping::TimeCategory => "time_category",
            Grouping::DayOfWeek => "day_of_week",
        }
    }

    pub fn requires_hourly(&self) -> bool {
        matches!(self, Grouping::HourAndWorkingDay | Grouping::TimeCategory)
    }

    /// Keys always present in the output, in display order
    fn fixed_keys(&self) -> Vec<GroupKey> {
        match self {
            Grouping::None => vec![GroupKey::All],
            Grouping::Season => Season::KNOWN.into_iter().map(GroupKey::Season).collect(),
            Grouping::Weather => WeatherSituation::KNOWN
                .into_iter()
                .map(GroupKey::Weather)
                .collect(),
            Grouping::HourAndWorkingDay => (0..HOURS_PER_DAY)
                .flat_map(|hour| {
                    [false, true].map(|is_workingday| GroupKey::HourAndWorkingDay {
                        hour,
                        is_workingday,
                    })
                })
                .collect(),
            Grouping::TimeCategory => TimeCategory::DISPLAY_ORDER
                .into_iter()
                .map(GroupKey::TimeCategory)
                .collect(),
            Grouping::DayOfWeek => WEEKDAY_ORDER.into_iter().map(GroupKey::DayOfWeek).collect(),
        }
    }

    fn key_of<R: UsageRecord + ?Sized>(&self, record: &R) -> Option<GroupKey> {
        match self {
            Grouping::None => Some(GroupKey::All),
            Grouping::Season => Some(GroupKey::Season(record.season_label())),
            Grouping::Weather => Some(GroupKey::Weather(record.weather_label())),
            Grouping::HourAndWorkingDay => record.hour().map(|hour| GroupKey::HourAndWorkingDay {
                hour,
                is_workingday: record.is_workingday(),
            }),
            Grouping::TimeCategory => record.time_category().map(GroupKey::TimeCategory),
            Grouping::DayOfWeek => Some(GroupKey::DayOfWeek(record.weekday())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    All,
    Season(Season),
    Weather(WeatherSituation),
    HourAndWorkingDay { hour: u8, is_workingday: bool },
    TimeCategory(TimeCategory),
    DayOfWeek(Weekday),
}

impl GroupKey {
    pub fn label(&self) -> String {
        match self {
            GroupKey::All => "All".to_string(),
            GroupKey::Season(season) => season.label().to_string(),
            GroupKey::Weather(weather) => weather.label().to_string(),
            GroupKey::HourAndWorkingDay {
                hour,
                is_workingday,
            } => format!(
                "{:02}:00 {}",
                hour,
                if *is_workingday { "working day" } else { "holiday" }
            ),
            GroupKey::TimeCategory(category) => category.label().to_string(),
            GroupKey::DayOfWeek(day) => weekday_name(*day).to_string(),
        }
    }

    /// Position of keys that fall outside the fixed set (unknown codes)
    fn extra_rank(&self) -> i64 {
        match self {
            GroupKey::Season(season) => season.code(),
            GroupKey::Weather(weather) => weather.code(),
            _ => i64::MAX,
        }
    }
}

/// What to aggregate: grouping key, metric columns and reduction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationSpec {
    pub grouping: Grouping,
    pub metrics: Vec<Metric>,
    pub reduction: Reduction,
}

impl AggregationSpec {
    pub fn new(grouping: Grouping, metrics: &[Metric], reduction: Reduction) -> Self {
        Self {
            grouping,
            metrics: metrics.to_vec(),
            reduction,
        }
    }

    pub fn mean_of(grouping: Grouping, metric: Metric) -> Self {
        Self::new(grouping, &[metric], Reduction::Mean)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRow {
    pub key: GroupKey,
    pub label: String,
    pub count: usize,
    /// One entry per requested metric; `None` means the group had no rows
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationResult {
    pub grouping: Grouping,
    pub reduction: Reduction,
    pub metrics: Vec<Metric>,
    pub rows: Vec<GroupRow>,
}

impl AggregationResult {
    pub fn row(&self, key: &GroupKey) -> Option<&GroupRow> {
        self.rows.iter().find(|r| &r.key == key)
    }

    /// Reduced value for one group and metric, `None` when there is no data.
    pub fn value(&self, key: &GroupKey, metric: Metric) -> Option<f64> {
        let column = self.metrics.iter().position(|m| *m == metric)?;
        self.row(key).and_then(|r| r.values[column])
    }

    pub fn has_data(&self) -> bool {
        self.rows.iter().any(|r| r.count > 0)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.label.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserTotals {
    pub records: usize,
    pub casual_users: u64,
    pub registered_users: u64,
    pub total_users: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub total_users: u64,
}

#[derive(Debug, Default)]
struct Accumulator {
    count: usize,
    sums: Vec<u64>,
}

pub struct Aggregator;

impl Aggregator {
    /// Reduce `records` according to `spec`.
    ///
    /// Every fixed key of the grouping appears in the output, in display
    /// order, even when no record falls into it. Season and weather groups
    /// for unknown codes are appended after the known ones, only when
    /// present.
    pub fn aggregate<'a, R, I>(records: I, spec: &AggregationSpec) -> Result<AggregationResult>
    where
        R: UsageRecord + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let records: Vec<&R> = records.into_iter().collect();

        if spec.grouping.requires_hourly() && records.iter().any(|r| r.hour().is_none()) {
            return Err(ProcessingError::UnsupportedGrouping(spec.grouping.name()));
        }

        Ok(Self::group(&records, spec))
    }

    fn group<R: UsageRecord>(records: &[&R], spec: &AggregationSpec) -> AggregationResult {
        let mut groups: HashMap<GroupKey, Accumulator> = HashMap::new();

        for record in records {
            let Some(key) = spec.grouping.key_of(*record) else {
                continue;
            };

            let acc = groups.entry(key).or_insert_with(|| Accumulator {
                count: 0,
                sums: vec![0; spec.metrics.len()],
            });
            acc.count += 1;
            for (sum, metric) in acc.sums.iter_mut().zip(&spec.metrics) {
                *sum += metric.value(*record) as u64;
            }
        }

        let mut keys = spec.grouping.fixed_keys();
        let mut extra: Vec<GroupKey> = groups
            .keys()
            .filter(|k| !keys.contains(*k))
            .cloned()
            .collect();
        extra.sort_by_key(GroupKey::extra_rank);
        keys.extend(extra);

        let rows = keys
            .into_iter()
            .map(|key| {
                let (count, values) = match groups.get(&key) {
                    Some(acc) => (
                        acc.count,
                        acc.sums
                            .iter()
                            .map(|&sum| Some(Self::reduce(sum, acc.count, spec.reduction)))
                            .collect(),
                    ),
                    None => (0, vec![None; spec.metrics.len()]),
                };
                GroupRow {
                    label: key.label(),
                    key,
                    count,
                    values,
                }
            })
            .collect::<Vec<_>>();

        debug!(
            grouping = spec.grouping.name(),
            records = records.len(),
            groups = rows.len(),
            "aggregated records"
        );

        AggregationResult {
            grouping: spec.grouping,
            reduction: spec.reduction,
            metrics: spec.metrics.clone(),
            rows,
        }
    }

    fn reduce(sum: u64, count: usize, reduction: Reduction) -> f64 {
        match reduction {
            Reduction::Sum => sum as f64,
            Reduction::Mean => sum as f64 / count as f64,
        }
    }

    fn mean_by<'a, R, I>(records: I, grouping: Grouping, metrics: &[Metric]) -> AggregationResult
    where
        R: UsageRecord + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let records: Vec<&R> = records.into_iter().collect();
        Self::group(&records, &AggregationSpec::new(grouping, metrics, Reduction::Mean))
    }

    /// Whole-table sums of the three user counts
    pub fn totals<'a, R, I>(records: I) -> UserTotals
    where
        R: UsageRecord + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        records
            .into_iter()
            .fold(UserTotals::default(), |mut totals, record| {
                totals.records += 1;
                totals.casual_users += record.casual_users() as u64;
                totals.registered_users += record.registered_users() as u64;
                totals.total_users += record.total_users() as u64;
                totals
            })
    }

    pub fn season_means<'a, R, I>(records: I) -> AggregationResult
    where
        R: UsageRecord + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        Self::mean_by(records, Grouping::Season, &[Metric::TotalUsers])
    }

    pub fn weather_means<'a, R, I>(records: I) -> AggregationResult
    where
        R: UsageRecord + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        Self::mean_by(records, Grouping::Weather, &[Metric::TotalUsers])
    }

    /// Mean casual and registered users per weekday, Monday first
    pub fn weekday_user_means<'a, R, I>(records: I) -> AggregationResult
    where
        R: UsageRecord + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        Self::mean_by(
            records,
            Grouping::DayOfWeek,
            &[Metric::CasualUsers, Metric::RegisteredUsers],
        )
    }

    pub fn hourly_profile<'a, I>(records: I) -> AggregationResult
    where
        I: IntoIterator<Item = &'a HourlyRecord>,
    {
        Self::mean_by(records, Grouping::HourAndWorkingDay, &[Metric::TotalUsers])
    }

    pub fn time_category_means<'a, I>(records: I) -> AggregationResult
    where
        I: IntoIterator<Item = &'a HourlyRecord>,
    {
        Self::mean_by(records, Grouping::TimeCategory, &[Metric::TotalUsers])
    }

    /// Total users per date, in date order
    pub fn daily_trend<'a, R, I>(records: I) -> Vec<TrendPoint>
    where
        R: UsageRecord + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let mut by_date: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        for record in records {
            *by_date.entry(record.date()).or_default() += record.total_users() as u64;
        }

        by_date
            .into_iter()
            .map(|(date, total_users)| TrendPoint { date, total_users })
            .collect()
    }
}
