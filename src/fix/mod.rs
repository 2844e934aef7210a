//! Autofix: apply cataloged fix strategies to a private copy of the document.
//!
//! Each fix is a local splice. Missing-section fixes run bottom-to-top so an
//! insertion never shifts the header line of an entry still waiting for its
//! fix; day insertions run last and locate their position by re-scanning the
//! current buffer.
mod day;
mod section;

pub use day::day_entry_lines;

use crate::problems::{Problem, ProblemCode, ProblemContext};
use crate::solutions::{self, FixStrategy};
use crate::template;
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Reverse;
use std::fmt;

/// Which non-default fix strategies the caller wants applied.
#[derive(Debug, Clone, Default)]
pub struct FixOptions {
    /// Codes whose solution has a fix strategy but is not `auto_fixable`.
    pub opt_in: Vec<ProblemCode>,
}

impl FixOptions {
    /// Also insert day entries for `missing_date` problems.
    pub fn with_missing_dates() -> Self {
        Self {
            opt_in: vec![ProblemCode::MissingDate],
        }
    }
}

/// Reason a fix was not applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixFailure {
    /// The problem does not name a template section.
    MissingTitle,
    MissingLine,
    HeaderOutOfRange { line_no: usize },
    /// The anchor line is no longer a day header.
    HeaderNotFound { line_no: usize },
    SectionPresent { title: String },
    EntryPresent { date: NaiveDate },
    Unsupported { code: ProblemCode },
}

impl fmt::Display for FixFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixFailure::MissingTitle => f.write_str("missing section title metadata"),
            FixFailure::MissingLine => f.write_str("missing entry line number"),
            FixFailure::HeaderOutOfRange { line_no } => {
                write!(f, "entry header line {line_no} out of range")
            }
            FixFailure::HeaderNotFound { line_no } => {
                write!(f, "no day header at line {line_no}")
            }
            FixFailure::SectionPresent { title } => write!(f, "section '{title}' already present"),
            FixFailure::EntryPresent { date } => write!(f, "entry for {date} already present"),
            FixFailure::Unsupported { code } => write!(f, "no fix strategy for {code}"),
        }
    }
}

/// Outcome of one attempted fix.
#[derive(Debug, Clone, Serialize)]
pub struct FixResult {
    pub problem: Problem,
    pub applied: bool,
    pub message: String,
}

/// Fixed document plus the outcome of every attempted fix.
#[derive(Debug, Clone)]
pub struct FixReport {
    pub lines: Vec<String>,
    pub results: Vec<FixResult>,
}

impl FixReport {
    pub fn applied_count(&self) -> usize {
        self.results.iter().filter(|result| result.applied).count()
    }
}

/// Apply every eligible fix for `problems` to a copy of `lines`.
///
/// Problems without a fix strategy, or whose strategy is neither
/// `auto_fixable` nor opted in, are not attempted and get no result.
pub fn apply_fixes(lines: &[String], problems: &[Problem], options: &FixOptions) -> FixReport {
    let mut buffer = lines.to_vec();
    let (mut sections, mut days): (Vec<_>, Vec<_>) = fixable_items(problems, options)
        .into_iter()
        .partition(|(_, strategy)| *strategy == FixStrategy::InsertSection);
    sections.sort_by_key(|(problem, _)| section_fix_key(problem));
    days.sort_by_key(|(problem, _)| day_fix_key(problem));

    let results: Vec<FixResult> = sections
        .into_iter()
        .chain(days)
        .map(|(problem, strategy)| apply_one(&mut buffer, problem, strategy))
        .collect();

    let report = FixReport {
        lines: buffer,
        results,
    };
    tracing::info!(
        attempted = report.results.len(),
        applied = report.applied_count(),
        "autofix pass complete"
    );
    report
}

fn fixable_items<'a>(
    problems: &'a [Problem],
    options: &FixOptions,
) -> Vec<(&'a Problem, FixStrategy)> {
    problems
        .iter()
        .filter_map(|problem| {
            let solution = solutions::get_solution(problem.code())?;
            let strategy = solution.fix?;
            let eligible = solution.auto_fixable || options.opt_in.contains(&solution.code);
            eligible.then_some((problem, strategy))
        })
        .collect()
}

fn section_fix_key(problem: &Problem) -> (Reverse<usize>, usize) {
    let line_no = problem.line_no.unwrap_or(0);
    let position = problem
        .section_title()
        .and_then(template::section_index)
        .unwrap_or(usize::MAX);
    (Reverse(line_no), position)
}

fn day_fix_key(problem: &Problem) -> Option<NaiveDate> {
    match &problem.context {
        ProblemContext::MissingDate { date, .. } => Some(*date),
        _ => None,
    }
}

fn apply_one(buffer: &mut Vec<String>, problem: &Problem, strategy: FixStrategy) -> FixResult {
    let outcome = match strategy {
        FixStrategy::InsertSection => section::insert_missing_section(buffer, problem),
        FixStrategy::InsertDay => day::insert_missing_day(buffer, problem),
    };
    let (applied, message) = match outcome {
        Ok(message) => (true, message),
        Err(failure) => (false, failure.to_string()),
    };
    tracing::debug!(
        code = %problem.code(),
        line = ?problem.line_no,
        applied,
        "{message}"
    );
    FixResult {
        problem: problem.clone(),
        applied,
        message,
    }
}

/// Surround `body` with blank lines where its neighbours in `lines` are not
/// blank, so sections stay one blank line apart without doubling blanks.
fn pad_insertion(lines: &[String], insert_at: usize, body: Vec<String>) -> Vec<String> {
    let needs_before = insert_at > 0
        && lines
            .get(insert_at - 1)
            .is_some_and(|line| !template::is_blank(line));
    let needs_after = lines
        .get(insert_at)
        .is_some_and(|line| !template::is_blank(line));

    let mut padded = Vec::with_capacity(body.len() + 2);
    if needs_before {
        padded.push(String::new());
    }
    padded.extend(body);
    if needs_after {
        padded.push(String::new());
    }
    padded
}

/// Summary line plus one line per fix that was not applied.
pub fn fix_report_lines(results: &[FixResult]) -> Vec<String> {
    if results.is_empty() {
        return Vec::new();
    }
    let applied = results.iter().filter(|result| result.applied).count();
    let skipped = results.len() - applied;
    let mut lines = vec![format!("Fixes: applied {applied}, skipped {skipped}")];
    for result in results.iter().filter(|result| !result.applied) {
        let label = match result.problem.line_no {
            Some(line_no) => format!("- line {line_no}: "),
            None => "- ".to_string(),
        };
        lines.push(format!("{label}{}", result.message));
    }
    lines
}

#[cfg(test)]
mod tests;
