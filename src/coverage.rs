//! Date coverage and weekday checks across all parsed entries.
//!
//! Coverage is computed after parsing so it sees every entry at once. The
//! missing-date set is always complete; display limits belong to reports.
use crate::model::Entry;
use crate::problems::{Problem, ProblemContext};
use crate::template;
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};

/// Missing dates keyed by range label (`"2026"` or `"<start> to <end>"`).
pub type MissingDates = BTreeMap<String, Vec<NaiveDate>>;

/// Entries whose stated weekday disagrees with their date, paired with the
/// actual weekday name.
pub fn find_weekday_mismatches(entries: &[Entry]) -> Vec<(&Entry, String)> {
    entries
        .iter()
        .filter_map(|entry| match entry.weekday_matches() {
            Some(false) => entry
                .actual_weekday()
                .map(|actual| (entry, actual.to_string())),
            _ => None,
        })
        .collect()
}

pub fn weekday_mismatch_problems(mismatches: &[(&Entry, String)]) -> Vec<Problem> {
    mismatches
        .iter()
        .filter_map(|(entry, actual)| {
            let date = entry.date?;
            Some(Problem::new(
                ProblemContext::WeekdayMismatch {
                    date,
                    weekday_header: entry.weekday_header.clone(),
                    actual: actual.clone(),
                },
                format!(
                    "weekday mismatch for {date}: header '{}' vs actual '{actual}'",
                    entry.weekday_header
                ),
                Some(entry.line_no),
            ))
        })
        .collect()
}

/// Dates without an entry, per explicit range or per calendar year.
///
/// A range is used only when both bounds are given; otherwise every year that
/// has at least one dated entry is checked in full.
pub fn find_missing_dates(
    entries: &[Entry],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> MissingDates {
    let dates: BTreeSet<NaiveDate> = entries.iter().filter_map(|entry| entry.date).collect();
    match (start, end) {
        (Some(start), Some(end)) => missing_for_range(&dates, start, end),
        _ => missing_for_years(&dates),
    }
}

fn missing_for_range(dates: &BTreeSet<NaiveDate>, start: NaiveDate, end: NaiveDate) -> MissingDates {
    let mut missing = MissingDates::new();
    missing.insert(format!("{start} to {end}"), absent_between(dates, start, end));
    missing
}

fn missing_for_years(dates: &BTreeSet<NaiveDate>) -> MissingDates {
    let years: BTreeSet<i32> = dates.iter().map(|date| date.year()).collect();
    let mut missing = MissingDates::new();
    for year in years {
        let (Some(first), Some(last)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        ) else {
            continue;
        };
        missing.insert(year.to_string(), absent_between(dates, first, last));
    }
    missing
}

fn absent_between(dates: &BTreeSet<NaiveDate>, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !dates.contains(day))
        .collect()
}

/// One `missing_date` problem per date, in label then date order.
pub fn missing_date_problems(missing: &MissingDates) -> Vec<Problem> {
    let mut problems = Vec::new();
    for (label, dates) in missing {
        for date in dates {
            let weekday = template::weekday_name(date.weekday());
            problems.push(Problem::new(
                ProblemContext::MissingDate {
                    date: *date,
                    label: label.clone(),
                },
                format!("missing entry for {date} ({weekday}) in {label}"),
                None,
            ));
        }
    }
    problems
}
