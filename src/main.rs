// Main entry point for the football report CLI
// Loads the three datasets and prints every answer to stdout

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use football_report::logging::init_logging;
use football_report::{report, Dataset, ReportConfig, YearRange};
use std::path::PathBuf;

/// Historical football results report
#[derive(ClapParser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing results.csv, shootouts.csv and goalscorers.csv
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// First calendar year included in the average-goals question
    #[arg(long, default_value_t = 1900)]
    from_year: i32,

    /// Last calendar year included in the average-goals question
    #[arg(long, default_value_t = 2000)]
    to_year: i32,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = ReportConfig {
        data_dir: args.data_dir,
        years: YearRange::new(args.from_year, args.to_year)?,
    };

    let mut dataset = Dataset::load(&config.data_dir).with_context(|| {
        format!(
            "could not load the datasets from {}",
            config.data_dir.display()
        )
    })?;

    print!("{}", report::render(&mut dataset, config.years));
    Ok(())
}
