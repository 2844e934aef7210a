//! Problem codes and the typed context each problem carries.
//!
//! A `Problem` is an immutable record: the context variant decides its code,
//! and carries exactly the fields that hint rendering and autofix need.
use crate::template::HeadingLevel;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Closed set of deviations the verifier can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemCode {
    MissingSection,
    UnexpectedHeading,
    HeadingLevel,
    DuplicateHeading,
    HeadingOrder,
    InvalidDate,
    InvalidWeekday,
    DuplicateDate,
    MissingBullet,
    MissingShortTerm,
    MissingLongTerm,
    MissingHelped,
    MissingHurt,
    MissingScore,
    InvalidScore,
    ScoreOutOfRange,
    NoDayHeaders,
    MissingDate,
    WeekdayMismatch,
}

impl ProblemCode {
    /// Return the stable string identifier used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemCode::MissingSection => "missing_section",
            ProblemCode::UnexpectedHeading => "unexpected_heading",
            ProblemCode::HeadingLevel => "heading_level",
            ProblemCode::DuplicateHeading => "duplicate_heading",
            ProblemCode::HeadingOrder => "heading_order",
            ProblemCode::InvalidDate => "invalid_date",
            ProblemCode::InvalidWeekday => "invalid_weekday",
            ProblemCode::DuplicateDate => "duplicate_date",
            ProblemCode::MissingBullet => "missing_bullet",
            ProblemCode::MissingShortTerm => "missing_short_term",
            ProblemCode::MissingLongTerm => "missing_long_term",
            ProblemCode::MissingHelped => "missing_helped",
            ProblemCode::MissingHurt => "missing_hurt",
            ProblemCode::MissingScore => "missing_score",
            ProblemCode::InvalidScore => "invalid_score",
            ProblemCode::ScoreOutOfRange => "score_out_of_range",
            ProblemCode::NoDayHeaders => "no_day_headers",
            ProblemCode::MissingDate => "missing_date",
            ProblemCode::WeekdayMismatch => "weekday_mismatch",
        }
    }

    /// Coverage problems are computed across all entries after parsing.
    pub fn is_coverage(&self) -> bool {
        matches!(self, ProblemCode::MissingDate | ProblemCode::WeekdayMismatch)
    }
}

impl fmt::Display for ProblemCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "code", content = "context", rename_all = "snake_case")]
pub enum ProblemContext {
    MissingSection {
        section_title: String,
        date: String,
        weekday_header: String,
    },
    UnexpectedHeading {
        heading_title: String,
    },
    HeadingLevel {
        heading_title: String,
        expected_level: HeadingLevel,
        found_level: HeadingLevel,
    },
    DuplicateHeading {
        heading_title: String,
    },
    HeadingOrder {
        heading_title: String,
    },
    InvalidDate {
        date: String,
    },
    InvalidWeekday {
        weekday_header: String,
    },
    DuplicateDate {
        date: NaiveDate,
        first_line: usize,
    },
    MissingBullet {
        section_title: String,
    },
    MissingShortTerm,
    MissingLongTerm,
    MissingHelped,
    MissingHurt,
    MissingScore,
    InvalidScore {
        score: String,
    },
    ScoreOutOfRange {
        score: String,
    },
    NoDayHeaders,
    MissingDate {
        date: NaiveDate,
        label: String,
    },
    WeekdayMismatch {
        date: NaiveDate,
        weekday_header: String,
        actual: String,
    },
}

impl ProblemContext {
    pub fn code(&self) -> ProblemCode {
        match self {
            ProblemContext::MissingSection { .. } => ProblemCode::MissingSection,
            ProblemContext::UnexpectedHeading { .. } => ProblemCode::UnexpectedHeading,
            ProblemContext::HeadingLevel { .. } => ProblemCode::HeadingLevel,
            ProblemContext::DuplicateHeading { .. } => ProblemCode::DuplicateHeading,
            ProblemContext::HeadingOrder { .. } => ProblemCode::HeadingOrder,
            ProblemContext::InvalidDate { .. } => ProblemCode::InvalidDate,
            ProblemContext::InvalidWeekday { .. } => ProblemCode::InvalidWeekday,
            ProblemContext::DuplicateDate { .. } => ProblemCode::DuplicateDate,
            ProblemContext::MissingBullet { .. } => ProblemCode::MissingBullet,
            ProblemContext::MissingShortTerm => ProblemCode::MissingShortTerm,
            ProblemContext::MissingLongTerm => ProblemCode::MissingLongTerm,
            ProblemContext::MissingHelped => ProblemCode::MissingHelped,
            ProblemContext::MissingHurt => ProblemCode::MissingHurt,
            ProblemContext::MissingScore => ProblemCode::MissingScore,
            ProblemContext::InvalidScore { .. } => ProblemCode::InvalidScore,
            ProblemContext::ScoreOutOfRange { .. } => ProblemCode::ScoreOutOfRange,
            ProblemContext::NoDayHeaders => ProblemCode::NoDayHeaders,
            ProblemContext::MissingDate { .. } => ProblemCode::MissingDate,
            ProblemContext::WeekdayMismatch { .. } => ProblemCode::WeekdayMismatch,
        }
    }
}

/// A located deviation from the expected journal structure or coverage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Problem {
    #[serde(flatten)]
    pub context: ProblemContext,
    pub message: String,
    /// 1-based; `None` for document-wide problems.
    pub line_no: Option<usize>,
}

impl Problem {
    pub fn new(context: ProblemContext, message: impl Into<String>, line_no: Option<usize>) -> Self {
        Self {
            context,
            message: message.into(),
            line_no,
        }
    }

    pub fn code(&self) -> ProblemCode {
        self.context.code()
    }

    /// Template title the problem targets, when it names one.
    pub fn section_title(&self) -> Option<&str> {
        match &self.context {
            ProblemContext::MissingSection { section_title, .. }
            | ProblemContext::MissingBullet { section_title } => Some(section_title),
            _ => None,
        }
    }
}
