//! Remediation catalog: one solution per problem code.
//!
//! Hints are rendered from the problem's typed context. A solution may name a
//! fix strategy; `auto_fixable` solutions are applied by `--fix`, the rest only
//! when the caller opts their code in.
use crate::problems::{Problem, ProblemCode, ProblemContext};

/// Text edit the autofix engine can perform for a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixStrategy {
    /// Insert a template section heading and its stub into an entry.
    InsertSection,
    /// Insert a complete day entry at its date-sorted position.
    InsertDay,
}

#[derive(Debug)]
pub struct Solution {
    pub code: ProblemCode,
    pub title: &'static str,
    pub auto_fixable: bool,
    pub fix: Option<FixStrategy>,
}

impl Solution {
    const fn hint_only(code: ProblemCode, title: &'static str) -> Self {
        Self {
            code,
            title,
            auto_fixable: false,
            fix: None,
        }
    }

    pub fn hint(&self, problem: &Problem) -> String {
        render_hint(&problem.context)
    }
}

static SOLUTIONS: [Solution; 19] = [
    Solution {
        code: ProblemCode::MissingSection,
        title: "Add missing section heading",
        auto_fixable: true,
        fix: Some(FixStrategy::InsertSection),
    },
    Solution::hint_only(ProblemCode::UnexpectedHeading, "Remove unexpected heading"),
    Solution::hint_only(ProblemCode::HeadingLevel, "Fix heading level"),
    Solution::hint_only(ProblemCode::DuplicateHeading, "Remove duplicate heading"),
    Solution::hint_only(ProblemCode::HeadingOrder, "Reorder heading"),
    Solution::hint_only(ProblemCode::InvalidDate, "Fix invalid date"),
    Solution::hint_only(ProblemCode::InvalidWeekday, "Fix invalid weekday"),
    Solution::hint_only(ProblemCode::DuplicateDate, "Resolve duplicate date"),
    Solution::hint_only(ProblemCode::MissingBullet, "Add missing list item"),
    Solution::hint_only(ProblemCode::MissingShortTerm, "Add short-term item"),
    Solution::hint_only(ProblemCode::MissingLongTerm, "Add long-term item"),
    Solution::hint_only(ProblemCode::MissingHelped, "Add helped item"),
    Solution::hint_only(ProblemCode::MissingHurt, "Add hurt item"),
    Solution::hint_only(ProblemCode::MissingScore, "Add score"),
    Solution::hint_only(ProblemCode::InvalidScore, "Fix score format"),
    Solution::hint_only(ProblemCode::ScoreOutOfRange, "Fix score range"),
    Solution::hint_only(ProblemCode::NoDayHeaders, "Add day headers"),
    Solution {
        code: ProblemCode::MissingDate,
        title: "Add missing date",
        auto_fixable: false,
        fix: Some(FixStrategy::InsertDay),
    },
    Solution::hint_only(ProblemCode::WeekdayMismatch, "Fix weekday mismatch"),
];

pub fn all_solutions() -> &'static [Solution] {
    &SOLUTIONS
}

pub fn get_solution(code: ProblemCode) -> Option<&'static Solution> {
    SOLUTIONS.iter().find(|solution| solution.code == code)
}

/// Remediation hint for a problem, or `None` when its code is not cataloged.
pub fn solution_hint(problem: &Problem) -> Option<String> {
    get_solution(problem.code()).map(|solution| solution.hint(problem))
}

fn render_hint(context: &ProblemContext) -> String {
    match context {
        ProblemContext::MissingSection {
            section_title,
            date,
            ..
        } => format!("Add the '{section_title}' heading under {date} to match the template."),
        ProblemContext::UnexpectedHeading { heading_title } => {
            format!("Remove '{heading_title}' or rename it to a template section heading.")
        }
        ProblemContext::HeadingLevel {
            heading_title,
            expected_level,
            ..
        } => format!("Change '{heading_title}' to level {expected_level} to match the template."),
        ProblemContext::DuplicateHeading { heading_title } => {
            format!("Remove the duplicate '{heading_title}' section; keep one per day.")
        }
        ProblemContext::HeadingOrder { heading_title } => {
            format!("Reorder '{heading_title}' to follow the template sequence.")
        }
        ProblemContext::InvalidDate { date } => format!("Fix the date '{date}' to YYYY-MM-DD."),
        ProblemContext::InvalidWeekday { weekday_header } => format!(
            "Start '{weekday_header}' with a full weekday name (e.g. 'Monday'); extra text may follow."
        ),
        ProblemContext::DuplicateDate { date, first_line } => format!(
            "Remove or merge the duplicate date '{date}' (first at line {first_line})."
        ),
        ProblemContext::MissingBullet { section_title } => {
            format!("Add at least one list item under '{section_title}'.")
        }
        ProblemContext::MissingShortTerm => {
            "Add a '- Short-term:' item under 'What I'm looking forward to'.".to_string()
        }
        ProblemContext::MissingLongTerm => {
            "Add a '- Long-term:' item under 'What I'm looking forward to'.".to_string()
        }
        ProblemContext::MissingHelped => {
            "Add a '- \u{2b06}\u{fe0f} Helped today:' item under 'Signals'.".to_string()
        }
        ProblemContext::MissingHurt => {
            "Add a '- \u{2b07}\u{fe0f} Hurt today:' item under 'Signals'.".to_string()
        }
        ProblemContext::MissingScore => {
            "Add a score line like '- 3/5' under 'Final score (1/5)'.".to_string()
        }
        ProblemContext::InvalidScore { .. } => {
            "Use a numeric score before /5 (e.g. '- 4/5').".to_string()
        }
        ProblemContext::ScoreOutOfRange { score } => {
            format!("Use a score between 0 and 5 instead of {score}.")
        }
        ProblemContext::NoDayHeaders => {
            "Add day headers like '## YYYY-MM-DD (Weekday)'.".to_string()
        }
        ProblemContext::MissingDate { date, .. } => format!("Add a full day entry for {date}."),
        ProblemContext::WeekdayMismatch { actual, .. } => {
            format!("Update the weekday to '{actual}' or correct the date.")
        }
    }
}
