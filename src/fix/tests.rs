use super::{apply_fixes, fix_report_lines, FixOptions, FixResult};
use crate::coverage::{find_missing_dates, missing_date_problems};
use crate::model::{split_lines, Entry};
use crate::parse::{parse_journal, ParseOptions};
use crate::problems::{Problem, ProblemCode, ProblemContext};
use chrono::NaiveDate;

fn parse(lines: &[String]) -> (Vec<Entry>, Vec<Problem>) {
    parse_journal(lines, &ParseOptions::default())
}

fn structural(lines: &[String]) -> Vec<Problem> {
    let (entries, mut problems) = parse(lines);
    for entry in entries {
        problems.extend(entry.problems);
    }
    problems
}

fn missing_sections(lines: &[String]) -> usize {
    structural(lines)
        .iter()
        .filter(|p| p.code() == ProblemCode::MissingSection)
        .count()
}

fn messages(results: &[FixResult]) -> Vec<&str> {
    results.iter().map(|r| r.message.as_str()).collect()
}

const SINGLE_SECTION_ENTRY: &str =
    "## 2026-03-02 (Monday)\n\n### What happened today\n- shipped the parser\n\n---\n";

#[test]
fn inserts_missing_sections_in_template_order() {
    let lines = split_lines(SINGLE_SECTION_ENTRY);
    let problems = structural(&lines);
    assert_eq!(problems.len(), 5);
    assert!(problems.iter().all(|p| p.code() == ProblemCode::MissingSection));

    let report = apply_fixes(&lines, &problems, &FixOptions::default());
    assert_eq!(report.applied_count(), 5);
    assert_eq!(
        messages(&report.results),
        vec![
            "inserted 'What I'm grateful for' section",
            "inserted 'What I'm looking forward to' section",
            "inserted 'Signals' section",
            "inserted 'One adjustment (tomorrow)' section",
            "inserted 'Final score (1/5)' section",
        ]
    );

    let expected = vec![
        "## 2026-03-02 (Monday)",
        "",
        "### What happened today",
        "- shipped the parser",
        "",
        "### What I'm grateful for",
        "- ",
        "- ",
        "- ",
        "",
        "### What I'm looking forward to",
        "- Short-term: ",
        "- Long-term: ",
        "",
        "## Signals",
        "- \u{2b06}\u{fe0f} Helped today:",
        "- \u{2b07}\u{fe0f} Hurt today:",
        "",
        "## One adjustment (tomorrow)",
        "- ",
        "",
        "### Final score (1/5)",
        "- /5",
        "",
        "---",
    ];
    assert_eq!(report.lines, expected);
    assert_eq!(missing_sections(&report.lines), 0);
    // Input buffer is untouched.
    assert_eq!(lines.len(), 6);
}

#[test]
fn rerunning_stale_problems_is_a_no_op() {
    let lines = split_lines(SINGLE_SECTION_ENTRY);
    let problems = structural(&lines);
    let fixed = apply_fixes(&lines, &problems, &FixOptions::default());

    let again = apply_fixes(&fixed.lines, &problems, &FixOptions::default());
    assert_eq!(again.applied_count(), 0);
    assert_eq!(again.lines, fixed.lines);
    assert!(again
        .results
        .iter()
        .all(|r| r.message.ends_with("already present")));
}

#[test]
fn inserts_before_next_template_heading() {
    let text = "## 2026-03-02 (Monday)
### What happened today
- a
### What I'm looking forward to
- Short-term: s
- Long-term: l
## Signals
- \u{2b06} Helped today: x
- \u{2b07} Hurt today: y
## One adjustment (tomorrow)
- c
### Final score (1/5)
- 3/5
";
    let lines = split_lines(text);
    let problems = structural(&lines);
    assert_eq!(problems.len(), 1);

    let report = apply_fixes(&lines, &problems, &FixOptions::default());
    assert_eq!(report.applied_count(), 1);
    assert_eq!(
        &report.lines[2..10],
        &[
            "- a",
            "",
            "### What I'm grateful for",
            "- ",
            "- ",
            "- ",
            "",
            "### What I'm looking forward to",
        ]
    );
    assert!(structural(&report.lines).is_empty());
}

#[test]
fn mid_entry_separator_does_not_pull_sections_upward() {
    let text = "## 2026-03-02 (Monday)
### What happened today
- a
---
### What I'm grateful for
- g
### What I'm looking forward to
- Short-term: s
- Long-term: l
## Signals
- \u{2b06} Helped today: x
- \u{2b07} Hurt today: y
## One adjustment (tomorrow)
- c
";
    let lines = split_lines(text);
    let problems = structural(&lines);
    let codes: Vec<_> = problems.iter().map(Problem::code).collect();
    assert_eq!(codes, vec![ProblemCode::MissingSection]);

    let report = apply_fixes(&lines, &problems, &FixOptions::default());
    assert_eq!(report.applied_count(), 1);
    assert_eq!(report.lines[3], "---");
    assert_eq!(
        &report.lines[13..],
        &["- c", "", "### Final score (1/5)", "- /5"]
    );
    // Only the blank score stub remains to be filled in.
    let after: Vec<_> = structural(&report.lines).iter().map(Problem::code).collect();
    assert_eq!(after, vec![ProblemCode::MissingScore]);
}

#[test]
fn fixes_in_several_entries_keep_offsets_valid() {
    let text = format!(
        "{SINGLE_SECTION_ENTRY}## 2026-03-03 (Tuesday)\n\n### Final score (1/5)\n- 3/5\n\n---\n"
    );
    let lines = split_lines(&text);
    let problems = structural(&lines);
    assert_eq!(problems.len(), 10);

    let report = apply_fixes(&lines, &problems, &FixOptions::default());
    assert_eq!(report.applied_count(), 10);
    assert_eq!(missing_sections(&report.lines), 0);
    let (entries, _) = parse(&report.lines);
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|entry| entry.sections.len() == 6));
    // Bottom entry is fixed first.
    assert_eq!(report.results[0].problem.line_no, Some(7));
}

#[test]
fn entry_without_separator_gets_padded_sections() {
    let lines = split_lines("## 2026-03-02 (Monday)\n### What happened today\n- a");
    let problems = structural(&lines);
    let report = apply_fixes(&lines, &problems, &FixOptions::default());
    assert_eq!(report.applied_count(), 5);
    assert_eq!(report.lines[3], "");
    assert_eq!(report.lines[4], "### What I'm grateful for");
    assert_eq!(report.lines.last().map(String::as_str), Some("- /5"));
    assert_eq!(missing_sections(&report.lines), 0);
}

#[test]
fn out_of_range_and_moved_headers_fail_locally() {
    let lines = split_lines(SINGLE_SECTION_ENTRY);
    let mut problems = structural(&lines);
    problems[0].line_no = Some(99);
    problems[1].line_no = Some(3);

    let report = apply_fixes(&lines, &problems, &FixOptions::default());
    assert_eq!(report.results.len(), 5);
    assert_eq!(report.applied_count(), 3);
    let failures: Vec<_> = report
        .results
        .iter()
        .filter(|r| !r.applied)
        .map(|r| r.message.as_str())
        .collect();
    assert_eq!(
        failures,
        vec!["entry header line 99 out of range", "no day header at line 3"]
    );
}

#[test]
fn problems_without_fix_strategy_are_not_attempted() {
    let lines = split_lines(SINGLE_SECTION_ENTRY);
    let problems = vec![Problem::new(
        ProblemContext::MissingBullet {
            section_title: "What I'm grateful for".to_string(),
        },
        "section has no list items",
        Some(3),
    )];
    let report = apply_fixes(&lines, &problems, &FixOptions::default());
    assert!(report.results.is_empty());
    assert_eq!(report.lines, lines);
}

#[test]
fn missing_days_need_opt_in() {
    let lines = split_lines(
        "## 2026-01-01 (Thursday)\n\n### What happened today\n- a\n\n---\n\n## 2026-01-03 (Saturday)\n",
    );
    let (entries, _) = parse(&lines);
    let start = NaiveDate::from_ymd_opt(2026, 1, 1);
    let end = NaiveDate::from_ymd_opt(2026, 1, 4);
    let problems = missing_date_problems(&find_missing_dates(&entries, start, end));
    assert_eq!(problems.len(), 2);

    let skipped = apply_fixes(&lines, &problems, &FixOptions::default());
    assert!(skipped.results.is_empty());

    let report = apply_fixes(&lines, &problems, &FixOptions::with_missing_dates());
    assert_eq!(report.applied_count(), 2);
    assert_eq!(
        messages(&report.results),
        vec![
            "inserted day entry for 2026-01-02",
            "inserted day entry for 2026-01-04",
        ]
    );

    let (entries, doc_problems) = parse(&report.lines);
    assert!(doc_problems.is_empty());
    let dates: Vec<_> = entries.iter().map(|e| e.date_str.as_str()).collect();
    assert_eq!(dates, vec!["2026-01-01", "2026-01-02", "2026-01-03", "2026-01-04"]);
    assert!(entries[1].problems.is_empty(), "{:?}", entries[1].problems);
    assert_eq!(entries[1].weekday_name.as_deref(), Some("Friday"));
    assert!(find_missing_dates(&entries, start, end)
        .values()
        .all(|dates| dates.is_empty()));
}

#[test]
fn inserted_day_sits_between_neighbours_with_single_blanks() {
    let lines = split_lines("## 2026-01-01 (Thursday)\n---\n\n## 2026-01-03 (Saturday)\n---");
    let problems = vec![Problem::new(
        ProblemContext::MissingDate {
            date: NaiveDate::from_ymd_opt(2026, 1, 2).expect("date"),
            label: "2026".to_string(),
        },
        "missing entry",
        None,
    )];
    let report = apply_fixes(&lines, &problems, &FixOptions::with_missing_dates());
    assert_eq!(report.lines[2], "");
    assert_eq!(report.lines[3], "## 2026-01-02 (Friday)");
    let separator = report.lines.len() - 4;
    assert_eq!(report.lines[separator], "---");
    assert_eq!(report.lines[separator + 1], "");
    assert_eq!(report.lines[separator + 2], "## 2026-01-03 (Saturday)");

    let again = apply_fixes(&report.lines, &problems, &FixOptions::with_missing_dates());
    assert_eq!(
        messages(&again.results),
        vec!["entry for 2026-01-02 already present"]
    );
}

#[test]
fn report_lines_list_only_unapplied_fixes() {
    let lines = split_lines(SINGLE_SECTION_ENTRY);
    let problems = structural(&lines);
    let fixed = apply_fixes(&lines, &problems, &FixOptions::default());
    assert_eq!(
        fix_report_lines(&fixed.results),
        vec!["Fixes: applied 5, skipped 0"]
    );

    let again = apply_fixes(&fixed.lines, &problems[..1], &FixOptions::default());
    assert_eq!(
        fix_report_lines(&again.results),
        vec![
            "Fixes: applied 0, skipped 1",
            "- line 1: section 'What I'm grateful for' already present",
        ]
    );
    assert!(fix_report_lines(&[]).is_empty());
}
