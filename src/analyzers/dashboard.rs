use crate::analyzers::aggregator::{
    AggregationResult, Aggregator, GroupKey, Metric, TrendPoint, UserTotals,
};
use crate::processors::{DateRange, Datasets};
use serde::Serialize;

/// Every metric the dashboard shows for one date range.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub range: DateRange,
    pub daily_records: usize,
    pub hourly_records: usize,
    pub totals: UserTotals,
    pub daily_trend: Vec<TrendPoint>,
    pub season_means: AggregationResult,
    pub weather_means: AggregationResult,
    pub hourly_profile: AggregationResult,
    pub time_category_means: AggregationResult,
    pub weekday_user_means: AggregationResult,
}

pub struct UsageDashboard<'a> {
    datasets: &'a Datasets,
}

impl<'a> UsageDashboard<'a> {
    pub fn new(datasets: &'a Datasets) -> Self {
        Self { datasets }
    }

    /// Full date span of the daily table
    pub fn default_range(&self) -> Option<DateRange> {
        self.datasets.date_bounds()
    }

    pub fn summarize(&self, range: &DateRange) -> DashboardSummary {
        let view = self.datasets.filter(range);

        DashboardSummary {
            range: *range,
            daily_records: view.daily.len(),
            hourly_records: view.hourly.len(),
            totals: Aggregator::totals(view.daily.iter().copied()),
            daily_trend: Aggregator::daily_trend(view.daily.iter().copied()),
            season_means: Aggregator::season_means(view.daily.iter().copied()),
            weather_means: Aggregator::weather_means(view.daily.iter().copied()),
            hourly_profile: Aggregator::hourly_profile(view.hourly.iter().copied()),
            time_category_means: Aggregator::time_category_means(view.hourly.iter().copied()),
            weekday_user_means: Aggregator::weekday_user_means(view.daily.iter().copied()),
        }
    }
}

fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => "no data".to_string(),
    }
}

impl DashboardSummary {
    pub fn is_empty(&self) -> bool {
        self.daily_records == 0 && self.hourly_records == 0
    }

    /// Busiest hour by mean total users, for working days or holidays
    pub fn peak_hour(&self, is_workingday: bool) -> Option<(u8, f64)> {
        self.hourly_profile
            .rows
            .iter()
            .filter_map(|row| match (&row.key, row.values.first().copied().flatten()) {
                (GroupKey::HourAndWorkingDay { hour, is_workingday: w }, Some(mean))
                    if *w == is_workingday =>
                {
                    Some((*hour, mean))
                }
                _ => None,
            })
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    pub fn busiest_day(&self) -> Option<TrendPoint> {
        self.daily_trend.iter().copied().max_by_key(|p| p.total_users)
    }

    fn mean_table(title: &str, result: &AggregationResult) -> String {
        let mut out = format!("{}:\n", title);
        for row in &result.rows {
            let values: Vec<String> = result
                .metrics
                .iter()
                .zip(&row.values)
                .map(|(metric, value)| {
                    if result.metrics.len() == 1 {
                        format_value(*value)
                    } else {
                        format!("{}={}", metric_short_name(*metric), format_value(*value))
                    }
                })
                .collect();
            out.push_str(&format!("- {:<20} {}\n", row.label, values.join(", ")));
        }
        out
    }

    pub fn summary(&self) -> String {
        if self.is_empty() {
            return format!("Date Range: {}\nNo data in the selected range", self.range);
        }

        let peak = |is_workingday| match self.peak_hour(is_workingday) {
            Some((hour, mean)) => format!("{:02}:00 ({:.1} avg users)", hour, mean),
            None => "no data".to_string(),
        };

        let busiest = match self.busiest_day() {
            Some(p) => format!("{} ({} users)", p.date, p.total_users),
            None => "no data".to_string(),
        };

        format!(
            "Date Range: {} ({} days)\n\
            Records: {} daily, {} hourly\n\
            Total Rentals: {}\n\
            Casual Users: {}\n\
            Registered Users: {}\n\
            Busiest Day: {}\n\
            Peak Hour (working day): {}\n\
            Peak Hour (holiday): {}\n\n\
            {}\n{}\n{}\n{}",
            self.range,
            self.range.num_days(),
            self.daily_records,
            self.hourly_records,
            self.totals.total_users,
            self.totals.casual_users,
            self.totals.registered_users,
            busiest,
            peak(true),
            peak(false),
            Self::mean_table("Average Rentals by Season", &self.season_means),
            Self::mean_table("Average Rentals by Weather", &self.weather_means),
            Self::mean_table("Average Rentals by Time of Day", &self.time_category_means),
            Self::mean_table("Average Users by Day of Week", &self.weekday_user_means),
        )
    }
}

fn metric_short_name(metric: Metric) -> &'static str {
    match metric {
        Metric::CasualUsers => "casual",
        Metric::RegisteredUsers => "registered",
        Metric::TotalUsers => "total",
    }
}
