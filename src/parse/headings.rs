use super::content::validate_section_content;
use crate::model::{Entry, SectionInfo};
use crate::problems::{Problem, ProblemContext};
use crate::template::{self, HeadingLevel};
use std::collections::BTreeSet;

/// A heading collected from an entry block, positioned relative to the block.
#[derive(Debug, Clone)]
struct BlockHeading<'a> {
    rel_idx: usize,
    level: HeadingLevel,
    title: &'a str,
}

/// A heading whose title belongs to the template.
#[derive(Debug, Clone)]
struct TrackedHeading<'a> {
    heading: BlockHeading<'a>,
    duplicate: bool,
}

/// Running state of the heading walk.
#[derive(Default)]
struct HeadingState<'a> {
    seen: BTreeSet<&'a str>,
    /// Smallest template index a heading may have without being out of order.
    expected_pos: usize,
    tracked: Vec<TrackedHeading<'a>>,
}

pub(super) fn parse_entry_sections(entry: &mut Entry, block: &[String], offset: usize) {
    let headings = collect_headings(block);
    let state = validate_headings(entry, headings, offset);
    check_missing_sections(entry, &state.seen);
    record_sections(entry, &state.tracked, block, offset);
    validate_section_content(entry);
}

fn collect_headings(block: &[String]) -> Vec<BlockHeading<'_>> {
    block
        .iter()
        .enumerate()
        .filter_map(|(rel_idx, line)| {
            template::parse_heading(line).map(|(level, title)| BlockHeading {
                rel_idx,
                level,
                title,
            })
        })
        .collect()
}

fn validate_headings<'a>(
    entry: &mut Entry,
    headings: Vec<BlockHeading<'a>>,
    offset: usize,
) -> HeadingState<'a> {
    let mut state = HeadingState::default();
    for heading in headings {
        process_heading(entry, heading, offset, &mut state);
    }
    state
}

fn process_heading<'a>(
    entry: &mut Entry,
    heading: BlockHeading<'a>,
    offset: usize,
    state: &mut HeadingState<'a>,
) {
    let line_no = offset + heading.rel_idx + 1;
    let title = heading.title;
    let (Some(section_index), Some(section)) =
        (template::section_index(title), template::section(title))
    else {
        entry.problems.push(Problem::new(
            ProblemContext::UnexpectedHeading {
                heading_title: title.to_string(),
            },
            format!("unexpected heading '{title}'"),
            Some(line_no),
        ));
        return;
    };

    if heading.level != section.level {
        entry.problems.push(Problem::new(
            ProblemContext::HeadingLevel {
                heading_title: title.to_string(),
                expected_level: section.level,
                found_level: heading.level,
            },
            format!("heading '{title}' should be level {}", section.level),
            Some(line_no),
        ));
    }

    let duplicate = !state.seen.insert(title);
    if duplicate {
        entry.problems.push(Problem::new(
            ProblemContext::DuplicateHeading {
                heading_title: title.to_string(),
            },
            format!("duplicate heading '{title}'"),
            Some(line_no),
        ));
    }

    if section_index < state.expected_pos {
        entry.problems.push(Problem::new(
            ProblemContext::HeadingOrder {
                heading_title: title.to_string(),
            },
            format!("heading '{title}' is out of order"),
            Some(line_no),
        ));
    }
    // Advance even when out of order; later headings compare against the
    // furthest template position reached.
    state.expected_pos = state.expected_pos.max(section_index + 1);
    state.tracked.push(TrackedHeading { heading, duplicate });
}

fn check_missing_sections(entry: &mut Entry, seen: &BTreeSet<&str>) {
    for title in template::titles() {
        if seen.contains(title) {
            continue;
        }
        let problem = missing_section_problem(entry, title);
        entry.problems.push(problem);
    }
}

fn missing_section_problem(entry: &Entry, title: &str) -> Problem {
    Problem::new(
        ProblemContext::MissingSection {
            section_title: title.to_string(),
            date: entry.date_str.clone(),
            weekday_header: entry.weekday_header.clone(),
        },
        format!("missing section '{title}'"),
        Some(entry.line_no),
    )
}

/// Store content ranges for the first occurrence of each template heading.
///
/// `tracked` is in block order. A range ends at the next template heading,
/// duplicates included; text under a repeated heading belongs to no section.
fn record_sections(
    entry: &mut Entry,
    tracked: &[TrackedHeading<'_>],
    block: &[String],
    offset: usize,
) {
    for (idx, item) in tracked.iter().enumerate() {
        if item.duplicate {
            continue;
        }
        let start = item.heading.rel_idx + 1;
        let end = tracked
            .get(idx + 1)
            .map(|next| next.heading.rel_idx)
            .unwrap_or(block.len());
        entry
            .sections
            .entry(item.heading.title.to_string())
            .or_insert_with(|| SectionInfo {
                title: item.heading.title.to_string(),
                level: item.heading.level,
                line_no: offset + item.heading.rel_idx + 1,
                content_lines: block[start..end].to_vec(),
            });
    }
}
