use super::{pad_insertion, FixFailure};
use crate::problems::{Problem, ProblemContext};
use crate::template::{self, TemplateSection};

/// Insert the heading and stub for a `missing_section` problem.
///
/// The entry is located by its header line and re-scanned, so a problem that
/// went stale after earlier edits fails instead of inserting a second copy.
pub(super) fn insert_missing_section(
    lines: &mut Vec<String>,
    problem: &Problem,
) -> Result<String, FixFailure> {
    let ProblemContext::MissingSection { section_title, .. } = &problem.context else {
        return Err(FixFailure::Unsupported {
            code: problem.code(),
        });
    };
    let (Some(position), Some(section)) = (
        template::section_index(section_title),
        template::section(section_title),
    ) else {
        return Err(FixFailure::MissingTitle);
    };
    let line_no = problem.line_no.ok_or(FixFailure::MissingLine)?;
    let start = line_no
        .checked_sub(1)
        .filter(|idx| *idx < lines.len())
        .ok_or(FixFailure::HeaderOutOfRange { line_no })?;
    if !template::is_day_header(&lines[start]) {
        return Err(FixFailure::HeaderNotFound { line_no });
    }

    let block_start = start + 1;
    let block_end = entry_end(lines, start);
    let block = &lines[block_start..block_end];
    if section_exists(block, section.title) {
        return Err(FixFailure::SectionPresent {
            title: section.title.to_string(),
        });
    }

    let insert_at = skip_leading_blanks(block, insert_index(block, position));
    let inserted = pad_insertion(block, insert_at, section_lines(section));
    let at = block_start + insert_at;
    lines.splice(at..at, inserted);
    Ok(format!("inserted '{}' section", section.title))
}

/// Index of the next day header after `start`, or the end of the document.
fn entry_end(lines: &[String], start: usize) -> usize {
    lines
        .iter()
        .enumerate()
        .skip(start + 1)
        .find(|(_, line)| template::is_day_header(line))
        .map(|(idx, _)| idx)
        .unwrap_or(lines.len())
}

fn section_exists(block: &[String], title: &str) -> bool {
    block
        .iter()
        .filter_map(|line| template::parse_heading(line))
        .any(|(_, heading)| heading == title)
}

/// Position of the entry's trailing `---`, or the block length when the last
/// separator is followed by anything other than blank lines.
fn content_end(block: &[String]) -> usize {
    match block.iter().rposition(|line| template::is_separator(line)) {
        Some(idx) if block[idx + 1..].iter().all(|line| template::is_blank(line)) => idx,
        _ => block.len(),
    }
}

/// Before the first template heading that belongs after `position`, else
/// before the trailing separator.
fn insert_index(block: &[String], position: usize) -> usize {
    block
        .iter()
        .position(|line| {
            template::parse_heading(line)
                .and_then(|(_, title)| template::section_index(title))
                .is_some_and(|index| index > position)
        })
        .unwrap_or_else(|| content_end(block))
}

fn skip_leading_blanks(block: &[String], insert_at: usize) -> usize {
    if insert_at != 0 {
        return insert_at;
    }
    block
        .iter()
        .position(|line| !template::is_blank(line))
        .unwrap_or(block.len())
}

fn section_lines(section: &TemplateSection) -> Vec<String> {
    let mut lines = vec![section.heading_line()];
    lines.extend(section.stub.iter().map(|line| line.to_string()));
    lines
}
