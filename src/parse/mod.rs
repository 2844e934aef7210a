//! Journal parsing: day headers, entries, sections, and content rules.
//!
//! The document is scanned once for day headers. Each header owns the lines up
//! to the next header, and every entry is validated independently so a
//! malformed day never blocks the ones after it.
//!
//! ## Stages per entry
//! - **Header**: ISO date and weekday label.
//! - **Headings**: template membership, level, duplicates, order, absences.
//! - **Sections**: content ranges for the first occurrence of each title.
//! - **Content**: bullets, paired labels, score.
mod content;
mod header;
mod headings;

use crate::model::Entry;
use crate::problems::{Problem, ProblemContext};
use crate::template;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Parser switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Append escaped text and code points to invalid weekday messages.
    pub debug_weekday: bool,
}

struct HeaderLine<'a> {
    index: usize,
    date: &'a str,
    label: &'a str,
}

/// Parse `lines` into entries plus document-level problems.
///
/// Entry-scoped problems live on each `Entry`; the returned list only holds
/// problems that span entries (duplicate dates) or the whole document.
pub fn parse_journal(lines: &[String], options: &ParseOptions) -> (Vec<Entry>, Vec<Problem>) {
    let headers = find_headers(lines);
    if headers.is_empty() {
        tracing::debug!(lines = lines.len(), "no day headers found");
        return (
            Vec::new(),
            vec![Problem::new(
                ProblemContext::NoDayHeaders,
                "no day headers found",
                None,
            )],
        );
    }

    let entries = build_entries(lines, &headers, options);
    let problems = duplicate_date_problems(&entries);
    tracing::debug!(
        entries = entries.len(),
        entry_problems = entries.iter().map(|e| e.problems.len()).sum::<usize>(),
        document_problems = problems.len(),
        "parsed journal"
    );
    (entries, problems)
}

fn find_headers(lines: &[String]) -> Vec<HeaderLine<'_>> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(index, line)| {
            template::parse_day_header(line).map(|header| HeaderLine {
                index,
                date: header.date,
                label: header.label,
            })
        })
        .collect()
}

fn build_entries(lines: &[String], headers: &[HeaderLine<'_>], options: &ParseOptions) -> Vec<Entry> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            let end = headers
                .get(idx + 1)
                .map(|next| next.index)
                .unwrap_or(lines.len());
            build_entry(lines, header, end, options)
        })
        .collect()
}

fn build_entry(lines: &[String], header: &HeaderLine<'_>, end: usize, options: &ParseOptions) -> Entry {
    let mut entry = Entry::new(header.date, header.label, header.index + 1);
    header::validate_header(&mut entry, options);
    let offset = header.index + 1;
    headings::parse_entry_sections(&mut entry, &lines[offset..end], offset);
    entry
}

fn duplicate_date_problems(entries: &[Entry]) -> Vec<Problem> {
    let mut seen: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    let mut problems = Vec::new();
    for entry in entries {
        let Some(date) = entry.date else {
            continue;
        };
        match seen.get(&date) {
            Some(&first_line) => problems.push(Problem::new(
                ProblemContext::DuplicateDate { date, first_line },
                format!("duplicate date '{date}' (first at line {first_line})"),
                Some(entry.line_no),
            )),
            None => {
                seen.insert(date, entry.line_no);
            }
        }
    }
    problems
}
