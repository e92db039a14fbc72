use bikeshare_processor::analyzers::{Aggregator, UsageDashboard};
use bikeshare_processor::processors::{
    DateRange, DatasetLoader, Datasets, IntegrityChecker, RangeFilter,
};
use bikeshare_processor::readers::{RawTable, TableReader};
use chrono::{Datelike, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const DAY_HEADER: &str = "instant,dteday,season,yr,mnth,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt";
const HOUR_HEADER: &str = "instant,dteday,season,yr,mnth,hr,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt";

// Create synthetic daily and hourly tables covering `days` consecutive days
fn create_test_tables(days: usize) -> (RawTable, RawTable) {
    let base_date = NaiveDate::from_ymd_opt(2011, 1, 1).unwrap();
    let mut day_csv = String::from(DAY_HEADER);
    let mut hour_csv = String::from(HOUR_HEADER);
    let mut hour_instant = 1;

    for day in 0..days {
        let date = base_date + chrono::Duration::days(day as i64);
        let season = (date.month0() / 3) % 4 + 1;
        let weekday = date.weekday().num_days_from_sunday();
        let workingday = u8::from((1..=5).contains(&weekday));
        let weather = (day % 3) + 1;
        let temp = 0.2 + (day % 50) as f64 * 0.01;

        let mut casual_sum = 0;
        let mut registered_sum = 0;
        for hour in 0..24u32 {
            let casual = 2 + hour * (day as u32 % 7);
            let registered = 10 + hour * 3;
            casual_sum += casual;
            registered_sum += registered;
            hour_csv.push_str(&format!(
                "\n{},{},{},{},{},{},0,{},{},{},{:.4},{:.4},0.6,0.2,{},{},{}",
                hour_instant,
                date.format("%Y-%m-%d"),
                season,
                date.year() - 2011,
                date.month(),
                hour,
                weekday,
                workingday,
                weather,
                temp,
                temp,
                casual,
                registered,
                casual + registered
            ));
            hour_instant += 1;
        }

        day_csv.push_str(&format!(
            "\n{},{},{},{},{},0,{},{},{},{:.4},{:.4},0.6,0.2,{},{},{}",
            day + 1,
            date.format("%Y-%m-%d"),
            season,
            date.year() - 2011,
            date.month(),
            weekday,
            workingday,
            weather,
            temp,
            temp,
            casual_sum,
            registered_sum,
            casual_sum + registered_sum
        ));
    }

    (
        TableReader::parse(day_csv.as_bytes()).unwrap(),
        TableReader::parse(hour_csv.as_bytes()).unwrap(),
    )
}

fn create_test_datasets(days: usize) -> Datasets {
    let (day, hour) = create_test_tables(days);
    Datasets::new(
        DatasetLoader::build_daily(&day).unwrap(),
        DatasetLoader::build_hourly(&hour).unwrap(),
    )
}

fn benchmark_build_hourly(c: &mut Criterion) {
    let (_, hour) = create_test_tables(365);

    c.bench_function("build_hourly", |b| {
        b.iter(|| {
            let records = DatasetLoader::build_hourly(black_box(&hour)).unwrap();
            black_box(records.len())
        })
    });
}

fn benchmark_dashboard_summary(c: &mut Criterion) {
    let datasets = create_test_datasets(731);
    let dashboard = UsageDashboard::new(&datasets);
    let range = dashboard.default_range().unwrap();

    c.bench_function("dashboard_summary", |b| {
        b.iter(|| {
            let summary = dashboard.summarize(black_box(&range));
            black_box(summary.totals.total_users)
        })
    });
}

fn benchmark_integrity_checker(c: &mut Criterion) {
    let datasets = create_test_datasets(365);

    c.bench_function("integrity_checker", |b| {
        b.iter(|| {
            let report = IntegrityChecker::new().check(black_box(&datasets));
            black_box(report.violations.len())
        })
    });
}

fn benchmark_varying_range_sizes(c: &mut Criterion) {
    let datasets = create_test_datasets(731);
    let start = NaiveDate::from_ymd_opt(2011, 1, 1).unwrap();
    let mut group = c.benchmark_group("hourly_profile_by_range");

    for &days in &[7i64, 30, 180, 730] {
        let range = DateRange::new(start, start + chrono::Duration::days(days)).unwrap();
        group.bench_with_input(BenchmarkId::new("days", days), &range, |b, range| {
            b.iter(|| {
                let view = RangeFilter::filter_range(datasets.hourly(), range);
                let profile = Aggregator::hourly_profile(view.iter().copied());
                black_box(profile.rows.len())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_build_hourly,
    benchmark_dashboard_summary,
    benchmark_integrity_checker,
    benchmark_varying_range_sizes
);
criterion_main!(benches);
