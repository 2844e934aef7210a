use super::{pad_insertion, FixFailure};
use crate::problems::{Problem, ProblemContext};
use crate::template;
use chrono::{Datelike, NaiveDate};

/// Insert a full template entry for a `missing_date` problem at its
/// date-sorted position.
pub(super) fn insert_missing_day(
    lines: &mut Vec<String>,
    problem: &Problem,
) -> Result<String, FixFailure> {
    let ProblemContext::MissingDate { date, .. } = &problem.context else {
        return Err(FixFailure::Unsupported {
            code: problem.code(),
        });
    };
    let date = *date;
    if lines.iter().any(|line| header_date(line) == Some(date)) {
        return Err(FixFailure::EntryPresent { date });
    }

    let insert_at = lines
        .iter()
        .position(|line| header_date(line).is_some_and(|existing| existing > date))
        .unwrap_or(lines.len());
    let inserted = pad_insertion(lines, insert_at, day_entry_lines(date));
    lines.splice(insert_at..insert_at, inserted);
    Ok(format!("inserted day entry for {date}"))
}

/// Parsed date of a day header line; headers with invalid dates are ignored.
fn header_date(line: &str) -> Option<NaiveDate> {
    let header = template::parse_day_header(line)?;
    NaiveDate::parse_from_str(header.date, "%Y-%m-%d").ok()
}

/// Lines of a complete empty entry for `date`, closed by a separator.
pub fn day_entry_lines(date: NaiveDate) -> Vec<String> {
    let mut lines = vec![
        format!("## {date} ({})", template::weekday_name(date.weekday())),
        String::new(),
    ];
    for section in &template::SECTIONS {
        lines.push(section.heading_line());
        lines.extend(section.stub.iter().map(|line| line.to_string()));
        lines.push(String::new());
    }
    lines.push(template::SEPARATOR.to_string());
    lines
}
