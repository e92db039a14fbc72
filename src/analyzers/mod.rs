pub mod aggregator;
pub mod dashboard;

pub use aggregator::{
    AggregationResult, AggregationSpec, Aggregator, GroupKey, GroupRow, Grouping, Metric,
    Reduction, TrendPoint, UserTotals,
};
pub use dashboard::{DashboardSummary, UsageDashboard};
