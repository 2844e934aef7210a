//! One verification pass: parse, coverage, and the problem sets built from them.
use crate::coverage::{self, MissingDates};
use crate::fix::{self, FixOptions, FixReport};
use crate::model::Entry;
use crate::parse::{self, ParseOptions};
use crate::problems::Problem;
use chrono::NaiveDate;

/// Result of checking one document buffer.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub entries: Vec<Entry>,
    /// Document-level problems followed by every entry's problems.
    pub structural: Vec<Problem>,
    pub missing_dates: MissingDates,
}

impl Analysis {
    /// Entries whose weekday label disagrees with their date.
    pub fn mismatches(&self) -> Vec<(&Entry, String)> {
        coverage::find_weekday_mismatches(&self.entries)
    }

    /// Weekday and missing-date problems.
    pub fn coverage_problems(&self) -> Vec<Problem> {
        let mut problems = coverage::weekday_mismatch_problems(&self.mismatches());
        problems.extend(coverage::missing_date_problems(&self.missing_dates));
        problems
    }

    /// Structural and coverage problems, the input to autofix.
    pub fn all_problems(&self) -> Vec<Problem> {
        let mut problems = self.structural.clone();
        problems.extend(self.coverage_problems());
        problems
    }
}

/// Parse `lines` and compute coverage for `range`, or for every year with
/// entries when no range is given.
pub fn analyze(
    lines: &[String],
    options: &ParseOptions,
    range: Option<(NaiveDate, NaiveDate)>,
) -> Analysis {
    let (entries, mut structural) = parse::parse_journal(lines, options);
    for entry in &entries {
        structural.extend(entry.problems.iter().cloned());
    }
    let (start, end) = range.unzip();
    let missing_dates = coverage::find_missing_dates(&entries, start, end);
    tracing::info!(
        entries = entries.len(),
        structural = structural.len(),
        missing = missing_dates.values().map(Vec::len).sum::<usize>(),
        "verified journal"
    );
    Analysis {
        entries,
        structural,
        missing_dates,
    }
}

/// Apply fixes for `analysis` to `lines` and re-check the fixed buffer.
pub fn fix_and_reanalyze(
    lines: &[String],
    analysis: &Analysis,
    parse_options: &ParseOptions,
    fix_options: &FixOptions,
    range: Option<(NaiveDate, NaiveDate)>,
) -> (FixReport, Analysis) {
    let report = fix::apply_fixes(lines, &analysis.all_problems(), fix_options);
    let updated = analyze(&report.lines, parse_options, range);
    (report, updated)
}
