//! Text, CSV, and JSON renderings of a verification run.
//!
//! Nothing here decides what is a problem; it only formats what parsing,
//! coverage, and autofix already computed.
use crate::coverage::MissingDates;
use crate::fix::FixResult;
use crate::model::Entry;
use crate::problems::Problem;
use crate::solutions::solution_hint;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Everything a report needs, borrowed from one verification pass.
pub struct ReportInputs<'a> {
    pub entries: &'a [Entry],
    /// Document-level and entry-level problems from parsing.
    pub structural: &'a [Problem],
    pub missing_dates: &'a MissingDates,
    pub mismatches: &'a [(&'a Entry, String)],
    /// Dates listed per label; 0 lists all.
    pub missing_limit: usize,
    pub fix_results: Option<&'a [FixResult]>,
}

/// Build the plain-text report, one element per output line.
pub fn build_report(inputs: &ReportInputs<'_>) -> Vec<String> {
    let mut lines = syntax_report_lines(inputs.structural);
    lines.extend(missing_report_lines(
        inputs.missing_dates,
        inputs.missing_limit,
    ));
    lines.extend(weekday_report_lines(inputs.mismatches));
    if let Some(results) = inputs.fix_results {
        lines.extend(crate::fix::fix_report_lines(results));
    }
    lines
}

fn syntax_report_lines(problems: &[Problem]) -> Vec<String> {
    if problems.is_empty() {
        return vec!["Syntax errors: none".to_string()];
    }
    let mut sorted: Vec<&Problem> = problems.iter().collect();
    sorted.sort_by_key(|problem| (problem.line_no.is_none(), problem.line_no));

    let mut lines = vec!["Syntax errors:".to_string()];
    for problem in sorted {
        let prefix = match problem.line_no {
            Some(line_no) => format!("- line {line_no}: "),
            None => "- ".to_string(),
        };
        lines.push(format!("{prefix}{}", problem.message));
        if let Some(hint) = solution_hint(problem) {
            lines.push(format!("  hint: {hint}"));
        }
    }
    lines
}

fn format_missing_dates(dates: &[NaiveDate], limit: usize) -> String {
    if dates.is_empty() {
        return "none".to_string();
    }
    let visible = if limit == 0 {
        dates.len()
    } else {
        limit.min(dates.len())
    };
    let shown = dates[..visible]
        .iter()
        .map(NaiveDate::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let remaining = dates.len() - visible;
    if remaining == 0 {
        shown
    } else {
        format!("{shown} (+{remaining} more)")
    }
}

fn missing_report_lines(missing: &MissingDates, limit: usize) -> Vec<String> {
    if missing.values().all(|dates| dates.is_empty()) {
        return vec!["Missing dates: none".to_string()];
    }
    let mut lines = vec!["Missing dates:".to_string()];
    for (label, dates) in missing {
        if dates.is_empty() {
            continue;
        }
        lines.push(format!("- {label}: {} missing", dates.len()));
        lines.push(format!("  {}", format_missing_dates(dates, limit)));
    }
    lines
}

fn weekday_report_lines(mismatches: &[(&Entry, String)]) -> Vec<String> {
    if mismatches.is_empty() {
        return vec!["Weekday mismatches: none".to_string()];
    }
    let mut lines = vec!["Weekday mismatches:".to_string()];
    for (entry, actual) in mismatches {
        lines.push(format!(
            "- {}: header '{}' vs actual '{actual}'",
            entry.date_str, entry.weekday_header
        ));
    }
    lines
}

const CSV_HEADER: [&str; 6] = [
    "date",
    "weekday_header",
    "weekday_actual",
    "weekday_matches",
    "sections_present",
    "sections_missing",
];

/// Write one CSV row per entry summarizing weekday and section coverage.
pub fn write_csv<W: Write + ?Sized>(entries: &[Entry], out: &mut W) -> io::Result<()> {
    write_csv_row(out, &CSV_HEADER.map(str::to_string))?;
    for entry in entries {
        write_csv_row(out, &csv_row(entry))?;
    }
    Ok(())
}

fn csv_row(entry: &Entry) -> [String; 6] {
    let matches = match entry.weekday_matches() {
        Some(true) => "true",
        Some(false) => "false",
        None => "",
    };
    [
        entry.date_str.clone(),
        entry.weekday_header.clone(),
        entry.actual_weekday().unwrap_or_default().to_string(),
        matches.to_string(),
        entry.present_titles().join("; "),
        entry.missing_titles().join("; "),
    ]
}

fn write_csv_row<W: Write + ?Sized>(out: &mut W, fields: &[String]) -> io::Result<()> {
    let row = fields
        .iter()
        .map(String::as_str)
        .map(csv_field)
        .collect::<Vec<_>>()
        .join(",");
    write!(out, "{row}\r\n")
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[derive(Serialize)]
struct JsonMismatch<'a> {
    date: &'a str,
    weekday_header: &'a str,
    actual: &'a str,
    line_no: usize,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    entries: usize,
    problems: &'a [Problem],
    missing_dates: BTreeMap<&'a str, Vec<NaiveDate>>,
    weekday_mismatches: Vec<JsonMismatch<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fixes: Option<&'a [FixResult]>,
}

/// Render the report as pretty JSON.
///
/// Missing dates are truncated to the same limit the text report uses.
pub fn build_json_report(inputs: &ReportInputs<'_>) -> serde_json::Result<String> {
    let missing_dates = inputs
        .missing_dates
        .iter()
        .map(|(label, dates)| {
            let shown = match inputs.missing_limit {
                0 => dates.clone(),
                limit => dates.iter().take(limit).copied().collect(),
            };
            (label.as_str(), shown)
        })
        .collect();
    let weekday_mismatches = inputs
        .mismatches
        .iter()
        .map(|(entry, actual)| JsonMismatch {
            date: &entry.date_str,
            weekday_header: &entry.weekday_header,
            actual,
            line_no: entry.line_no,
        })
        .collect();
    let report = JsonReport {
        entries: inputs.entries.len(),
        problems: inputs.structural,
        missing_dates,
        weekday_mismatches,
        fixes: inputs.fix_results,
    };
    serde_json::to_string_pretty(&report)
}
