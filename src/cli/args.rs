use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bikeshare-processor")]
#[command(about = "Normalize and aggregate daily and hourly bike-share usage data")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Hide the progress spinner")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Settings file [default: bikeshare.toml if present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    #[arg(long, help = "Daily dataset CSV [default: day.csv]")]
    pub day_file: Option<PathBuf>,

    #[arg(long, help = "Hourly dataset CSV [default: hour.csv]")]
    pub hour_file: Option<PathBuf>,

    #[arg(long, help = "Read input files through a memory map")]
    pub mmap: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print usage metrics for a date range
    Report {
        #[command(flatten)]
        input: InputArgs,

        #[arg(short, long, help = "First date (YYYY-MM-DD) [default: earliest date]")]
        start: Option<NaiveDate>,

        #[arg(short, long, help = "Last date (YYYY-MM-DD) [default: latest date]")]
        end: Option<NaiveDate>,

        #[arg(long, help = "Emit the summary as JSON")]
        json: bool,
    },

    /// Check both datasets for data-quality problems
    Validate {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Display record counts and date coverage of both datasets
    Info {
        #[command(flatten)]
        input: InputArgs,
    },
}
