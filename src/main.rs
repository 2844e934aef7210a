use anyhow::{Context, Result};
use clap::Parser;
use journal_verify::config::{self, Overrides};
use journal_verify::fix::{FixOptions, FixResult};
use journal_verify::model::{join_lines, split_lines};
use journal_verify::output::{self, OutputTarget};
use journal_verify::parse::ParseOptions;
use journal_verify::report::{self, ReportInputs};
use journal_verify::verify::{self, Analysis};
use std::fs;
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    init_tracing(args.verbose);

    let file_config = args
        .config
        .as_deref()
        .map(config::load_config)
        .transpose()?;
    let settings = config::resolve_settings(
        file_config.as_ref(),
        &Overrides {
            missing_limit: args.missing_limit,
            debug_weekday: args.debug_weekday,
            fix_missing_dates: args.fix_missing_dates,
        },
    );
    let range = args.coverage_range()?;

    let text = fs::read_to_string(&args.path)
        .with_context(|| format!("read journal {}", args.path.display()))?;
    let lines = split_lines(&text);
    let parse_options = ParseOptions {
        debug_weekday: settings.debug_weekday,
    };
    let mut analysis = verify::analyze(&lines, &parse_options, range);

    let mut fix_results: Option<Vec<FixResult>> = None;
    if args.fixing() {
        let fix_options = if settings.fix_missing_dates {
            FixOptions::with_missing_dates()
        } else {
            FixOptions::default()
        };
        let (fixed, updated) =
            verify::fix_and_reanalyze(&lines, &analysis, &parse_options, &fix_options, range);
        if args.fix {
            fs::write(&args.path, join_lines(&fixed.lines))
                .with_context(|| format!("write journal {}", args.path.display()))?;
            tracing::info!(
                path = %args.path.display(),
                applied = fixed.applied_count(),
                "rewrote journal"
            );
        }
        analysis = updated;
        fix_results = Some(fixed.results);
    }

    write_report(&args, &analysis, fix_results.as_deref(), settings.missing_limit)?;
    if let Some(csv) = args.csv.as_deref() {
        let target = OutputTarget::from_arg(Some(csv), OutputTarget::Stdout);
        output::write_with(&target, |out| report::write_csv(&analysis.entries, out))?;
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn write_report(
    args: &cli::Args,
    analysis: &Analysis,
    fix_results: Option<&[FixResult]>,
    missing_limit: usize,
) -> Result<()> {
    let mismatches = analysis.mismatches();
    let inputs = ReportInputs {
        entries: &analysis.entries,
        structural: &analysis.structural,
        missing_dates: &analysis.missing_dates,
        mismatches: &mismatches,
        missing_limit,
        fix_results,
    };
    let target = OutputTarget::from_arg(args.report.as_deref(), OutputTarget::Stderr);
    let lines = if args.json {
        vec![report::build_json_report(&inputs).context("serialize JSON report")?]
    } else {
        report::build_report(&inputs)
    };
    output::write_lines(&target, &lines)
}
