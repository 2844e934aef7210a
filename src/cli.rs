//! Command-line arguments for `journal-verify`.
//!
//! The CLI only gathers inputs; validation rules live in the library.
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Validate a daily journal markdown file against its entry template.
#[derive(Parser, Debug)]
#[command(
    name = "journal-verify",
    version,
    about = "Validate a daily journal against its entry template",
    after_help = "Examples:\n  journal-verify journal.md\n  journal-verify journal.md --year 2026 --csv summary.csv\n  journal-verify journal.md --fix\n  journal-verify journal.md --fix-dry-run --fix-missing-dates --report -"
)]
pub struct Args {
    /// Journal markdown file
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Text report destination (default stderr, `-` for stdout)
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Write a per-entry CSV summary (`-` for stdout)
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Write the report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// First date of the coverage range (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", requires = "end", conflicts_with = "year")]
    pub start: Option<NaiveDate>,

    /// Last date of the coverage range (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", requires = "start", conflicts_with = "year")]
    pub end: Option<NaiveDate>,

    /// Check coverage for one calendar year
    #[arg(long, value_name = "YEAR")]
    pub year: Option<i32>,

    /// Missing dates listed per range (0 lists all)
    #[arg(long, value_name = "N")]
    pub missing_limit: Option<usize>,

    /// Show code points of invalid weekday labels
    #[arg(long)]
    pub debug_weekday: bool,

    /// Apply autofixes and rewrite the file
    #[arg(long, conflicts_with = "fix_dry_run")]
    pub fix: bool,

    /// Compute autofixes and report them without writing
    #[arg(long)]
    pub fix_dry_run: bool,

    /// Also insert template entries for missing dates when fixing
    #[arg(long)]
    pub fix_missing_dates: bool,

    /// JSON config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn fixing(&self) -> bool {
        self.fix || self.fix_dry_run
    }

    /// Coverage range from `--start/--end` or `--year`; `None` checks every
    /// year that has entries.
    pub fn coverage_range(&self) -> Result<Option<(NaiveDate, NaiveDate)>> {
        if let Some(year) = self.year {
            let first = NaiveDate::from_ymd_opt(year, 1, 1);
            let last = NaiveDate::from_ymd_opt(year, 12, 31);
            return match (first, last) {
                (Some(first), Some(last)) => Ok(Some((first, last))),
                _ => Err(anyhow!("year {year} is out of range")),
            };
        }
        match (self.start, self.end) {
            (Some(start), Some(end)) if start > end => Err(anyhow!(
                "--start {start} must not be after --end {end}"
            )),
            (Some(start), Some(end)) => Ok(Some((start, end))),
            (None, None) => Ok(None),
            _ => Err(anyhow!("--start and --end must be given together")),
        }
    }
}
