mod common;

use common::{stderr, stdout, JournalFixture, COMPLETE_ENTRY};

const SINGLE_SECTION_ENTRY: &str =
    "## 2026-03-02 (Monday)\n\n### What happened today\n- shipped the parser\n\n---\n";

#[test]
fn clean_journal_reports_none_on_stderr() {
    let fixture = JournalFixture::new(COMPLETE_ENTRY);
    let output = fixture.run(&["--start", "2026-03-02", "--end", "2026-03-02"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).is_empty());
    let report = stderr(&output);
    assert!(report.contains("Syntax errors: none"), "{report}");
    assert!(report.contains("Missing dates: none"), "{report}");
    assert!(report.contains("Weekday mismatches: none"), "{report}");
}

#[test]
fn problems_do_not_change_exit_status() {
    let fixture = JournalFixture::new("## 2026-03-02 (Tuesday)\n### Oops\n");
    let output = fixture.run(&["--report", "-", "--start", "2026-03-02", "--end", "2026-03-02"]);
    assert!(output.status.success());
    let report = stdout(&output);
    assert!(report.contains("- line 2: unexpected heading 'Oops'"), "{report}");
    assert!(
        report.contains("- 2026-03-02: header 'Tuesday' vs actual 'Monday'"),
        "{report}"
    );
}

#[test]
fn year_range_truncates_missing_dates() {
    let fixture = JournalFixture::new(COMPLETE_ENTRY);
    let output = fixture.run(&["--year", "2026", "--missing-limit", "2", "--report", "-"]);
    assert!(output.status.success());
    let report = stdout(&output);
    assert!(
        report.contains("- 2026-01-01 to 2026-12-31: 364 missing"),
        "{report}"
    );
    assert!(
        report.contains("  2026-01-01, 2026-01-02 (+362 more)"),
        "{report}"
    );
}

#[test]
fn config_file_sets_missing_limit() {
    let fixture = JournalFixture::new(COMPLETE_ENTRY);
    let config = fixture.path("verify.json");
    std::fs::write(&config, r#"{ "missing_limit": 1 }"#).expect("write config");
    let config = config.to_string_lossy().into_owned();

    let output = fixture.run(&["--config", &config, "--report", "-"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("  2026-01-01 (+363 more)"));

    let output = fixture.run(&["--config", &config, "--missing-limit", "3", "--report", "-"]);
    assert!(stdout(&output).contains("  2026-01-01, 2026-01-02, 2026-01-03 (+361 more)"));
}

#[test]
fn invalid_config_fails_with_path() {
    let fixture = JournalFixture::new(COMPLETE_ENTRY);
    let config = fixture.path("verify.json");
    std::fs::write(&config, r#"{ "limit": 1 }"#).expect("write config");
    let output = fixture.run(&["--config", &config.to_string_lossy()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("verify.json"));
}

#[test]
fn csv_goes_to_stdout_with_dash() {
    let fixture = JournalFixture::new(COMPLETE_ENTRY);
    let output = fixture.run(&["--csv", "-"]);
    assert!(output.status.success());
    let csv = stdout(&output);
    let rows: Vec<_> = csv.lines().collect();
    assert_eq!(
        rows,
        vec![
            "date,weekday_header,weekday_actual,weekday_matches,sections_present,sections_missing",
            "2026-03-02,Monday,Monday,true,What happened today; What I'm grateful for; \
             What I'm looking forward to; Signals; One adjustment (tomorrow); Final score (1/5),",
        ]
    );
}

#[test]
fn csv_file_is_written() {
    let fixture = JournalFixture::new(COMPLETE_ENTRY);
    let csv = fixture.path("summary.csv");
    let output = fixture.run(&["--csv", &csv.to_string_lossy()]);
    assert!(output.status.success());
    let text = std::fs::read_to_string(&csv).expect("read csv");
    assert_eq!(text.lines().count(), 2);
}

#[test]
fn json_report_is_parseable() {
    let fixture = JournalFixture::new(SINGLE_SECTION_ENTRY);
    let output = fixture.run(&["--json", "--report", "-", "--year", "2026"]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json report");
    assert_eq!(value["entries"], 1);
    let problems = value["problems"].as_array().expect("problems array");
    assert_eq!(problems.len(), 5);
    assert_eq!(problems[0]["code"], "missing_section");
    assert_eq!(problems[0]["line_no"], 1);
    assert_eq!(
        value["missing_dates"]["2026-01-01 to 2026-12-31"]
            .as_array()
            .map(Vec::len),
        Some(20)
    );
}

#[test]
fn fix_rewrites_journal_and_reports_summary() {
    let fixture = JournalFixture::new(SINGLE_SECTION_ENTRY);
    let output = fixture.run(&["--fix", "--start", "2026-03-02", "--end", "2026-03-02"]);
    assert!(output.status.success());
    let report = stderr(&output);
    assert!(report.contains("Syntax errors: none"), "{report}");
    assert!(report.contains("Fixes: applied 5, skipped 0"), "{report}");

    let fixed = fixture.contents();
    assert!(fixed.ends_with("### Final score (1/5)\n- /5\n\n---\n"), "{fixed}");
    assert!(fixed.contains("- shipped the parser\n\n### What I'm grateful for\n"));

    let again = fixture.run(&["--fix", "--start", "2026-03-02", "--end", "2026-03-02"]);
    assert!(stderr(&again).contains("Syntax errors: none"));
    assert!(!stderr(&again).contains("Fixes:"));
    assert_eq!(fixture.contents(), fixed);
}

#[test]
fn dry_run_leaves_file_untouched() {
    let fixture = JournalFixture::new(SINGLE_SECTION_ENTRY);
    let output = fixture.run(&["--fix-dry-run", "--report", "-"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Fixes: applied 5, skipped 0"));
    assert_eq!(fixture.contents(), SINGLE_SECTION_ENTRY);
}

#[test]
fn missing_dates_are_filled_on_request() {
    let fixture = JournalFixture::new(COMPLETE_ENTRY);
    let output = fixture.run(&[
        "--fix",
        "--fix-missing-dates",
        "--start",
        "2026-03-01",
        "--end",
        "2026-03-03",
    ]);
    assert!(output.status.success());
    let report = stderr(&output);
    assert!(report.contains("Missing dates: none"), "{report}");
    assert!(report.contains("Fixes: applied 2, skipped 0"), "{report}");

    let fixed = fixture.contents();
    let headers: Vec<_> = fixed.lines().filter(|line| line.starts_with("## 2026")).collect();
    assert_eq!(
        headers,
        vec![
            "## 2026-03-01 (Sunday)",
            "## 2026-03-02 (Monday)",
            "## 2026-03-03 (Tuesday)",
        ]
    );
}

#[test]
fn argument_errors_fail() {
    let fixture = JournalFixture::new(COMPLETE_ENTRY);
    assert!(!fixture.run(&["--fix", "--fix-dry-run"]).status.success());
    assert!(!fixture.run(&["--start", "2026-01-01"]).status.success());
    assert!(!fixture
        .run(&["--start", "2026-02-01", "--end", "2026-01-01"])
        .status
        .success());
    assert!(!fixture
        .run(&["--year", "2026", "--start", "2026-01-01", "--end", "2026-01-02"])
        .status
        .success());
}

#[test]
fn missing_journal_names_the_path() {
    let fixture = JournalFixture::new("");
    std::fs::remove_file(&fixture.journal).expect("remove journal");
    let output = fixture.run(&[]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("journal.md"));
}
