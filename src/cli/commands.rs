use crate::analyzers::UsageDashboard;
use crate::cli::args::{Cli, Commands, InputArgs};
use crate::error::{ProcessingError, Result};
use crate::processors::{date_bounds, DateRange, DatasetLoader, Datasets, IntegrityChecker};
use crate::utils::progress::ProgressReporter;
use crate::utils::Settings;
use tracing::info;

fn load(settings: &Settings, input: &InputArgs, silent: bool) -> Result<Datasets> {
    let settings = settings
        .clone()
        .with_day_csv(input.day_file.clone())
        .with_hour_csv(input.hour_file.clone());

    info!(
        day = %settings.day_csv.display(),
        hour = %settings.hour_csv.display(),
        "loading datasets"
    );

    let progress = ProgressReporter::new_spinner("Loading datasets...", silent);
    let loader = DatasetLoader::with_mmap(settings.use_mmap || input.mmap);

    loader
        .load(&settings.day_csv, &settings.hour_csv, Some(&progress))
        .inspect_err(|_| progress.abandon())
}

fn describe(range: Option<DateRange>) -> String {
    match range {
        Some(r) => format!("{} ({} days)", r, r.num_days()),
        None => "empty".to_string(),
    }
}

pub fn run(cli: Cli, settings: &Settings) -> Result<()> {
    match cli.command {
        Commands::Report {
            input,
            start,
            end,
            json,
        } => {
            let datasets = load(settings, &input, cli.quiet || json)?;
            let dashboard = UsageDashboard::new(&datasets);

            let bounds = dashboard.default_range().ok_or_else(|| {
                ProcessingError::InvalidFormat("daily dataset has no records".to_string())
            })?;
            let range = DateRange::new(
                start.unwrap_or(bounds.start()),
                end.unwrap_or(bounds.end()),
            )?;

            let summary = dashboard.summarize(&range);

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("\n{}", summary.summary());
            }
        }

        Commands::Validate { input } => {
            let datasets = load(settings, &input, cli.quiet)?;

            let checker = IntegrityChecker::new();
            let report = checker.check(&datasets);
            println!("\n{}", checker.generate_summary(&report));

            if report.is_clean() {
                println!("✅ All data passed validation checks");
            } else {
                println!("⚠️  Found {} validation issues", report.violations.len());
            }
        }

        Commands::Info { input } => {
            let datasets = load(settings, &input, cli.quiet)?;

            println!("\nDaily dataset:");
            println!("- Records: {}", datasets.daily().len());
            println!("- Dates: {}", describe(datasets.date_bounds()));
            println!("\nHourly dataset:");
            println!("- Records: {}", datasets.hourly().len());
            println!("- Dates: {}", describe(date_bounds(datasets.hourly())));
        }
    }

    Ok(())
}
