use super::ParseOptions;
use crate::model::Entry;
use crate::problems::{Problem, ProblemContext};
use crate::template;
use chrono::NaiveDate;

/// Parse the header date and weekday label, recording problems on `entry`.
pub(super) fn validate_header(entry: &mut Entry, options: &ParseOptions) {
    match NaiveDate::parse_from_str(&entry.date_str, "%Y-%m-%d") {
        Ok(date) => entry.date = Some(date),
        Err(_) => {
            let problem = Problem::new(
                ProblemContext::InvalidDate {
                    date: entry.date_str.clone(),
                },
                format!("invalid date '{}'", entry.date_str),
                Some(entry.line_no),
            );
            entry.problems.push(problem);
        }
    }

    let canonical =
        template::weekday_prefix(&entry.weekday_header).and_then(template::canonical_weekday);
    match canonical {
        Some(name) => entry.weekday_name = Some(name.to_string()),
        None => {
            let problem = Problem::new(
                ProblemContext::InvalidWeekday {
                    weekday_header: entry.weekday_header.clone(),
                },
                weekday_error(&entry.weekday_header, options.debug_weekday),
                Some(entry.line_no),
            );
            entry.problems.push(problem);
        }
    }
}

fn weekday_error(label: &str, debug: bool) -> String {
    let message = format!(
        "invalid weekday header '{label}': must start with one of {} (extra text allowed after the weekday)",
        template::allowed_weekdays()
    );
    if !debug {
        return message;
    }
    format!("{message} [debug: {}]", weekday_debug_details(label))
}

/// Escaped text, character count, and code points of a weekday label.
///
/// Look-alike characters (non-breaking spaces, Cyrillic letters) render the
/// same as ASCII in most terminals; this makes them visible.
pub(super) fn weekday_debug_details(label: &str) -> String {
    let escaped: String = label.chars().flat_map(char::escape_default).collect();
    let codepoints = label
        .chars()
        .map(|ch| format!("U+{:04X}", ch as u32))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "raw={escaped}, len={}, codepoints={codepoints}",
        label.chars().count()
    )
}
