//! The fixed day-entry template and the line grammar used to recognize it.
//!
//! Every entry is expected to carry the same six sections in the same order.
//! The template is not configurable; the parser, the autofix engine, and the
//! CSV writer all read it from here so they cannot drift apart.
use chrono::Weekday;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

pub const WHAT_HAPPENED: &str = "What happened today";
pub const GRATEFUL_FOR: &str = "What I'm grateful for";
pub const LOOKING_FORWARD: &str = "What I'm looking forward to";
pub const SIGNALS: &str = "Signals";
pub const ONE_ADJUSTMENT: &str = "One adjustment (tomorrow)";
pub const FINAL_SCORE: &str = "Final score (1/5)";

/// Trimmed content of the line that closes a day entry.
pub const SEPARATOR: &str = "---";

/// Markdown heading depth allowed inside an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum HeadingLevel {
    #[serde(rename = "##")]
    H2,
    #[serde(rename = "###")]
    H3,
}

impl HeadingLevel {
    /// Return the heading marker as written in the document.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H2 => "##",
            HeadingLevel::H3 => "###",
        }
    }

    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "##" => Some(HeadingLevel::H2),
            "###" => Some(HeadingLevel::H3),
            _ => None,
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One section of the day template.
#[derive(Debug)]
pub struct TemplateSection {
    pub title: &'static str,
    pub level: HeadingLevel,
    /// Lines inserted under the heading when autofix adds the section.
    pub stub: &'static [&'static str],
}

impl TemplateSection {
    /// Render the heading line for this section.
    pub fn heading_line(&self) -> String {
        format!("{} {}", self.level.as_str(), self.title)
    }
}

pub static SECTIONS: [TemplateSection; 6] = [
    TemplateSection {
        title: WHAT_HAPPENED,
        level: HeadingLevel::H3,
        stub: &["- ", "- ", "- ", "- "],
    },
    TemplateSection {
        title: GRATEFUL_FOR,
        level: HeadingLevel::H3,
        stub: &["- ", "- ", "- "],
    },
    TemplateSection {
        title: LOOKING_FORWARD,
        level: HeadingLevel::H3,
        stub: &["- Short-term: ", "- Long-term: "],
    },
    TemplateSection {
        title: SIGNALS,
        level: HeadingLevel::H2,
        stub: &["- \u{2b06}\u{fe0f} Helped today:", "- \u{2b07}\u{fe0f} Hurt today:"],
    },
    TemplateSection {
        title: ONE_ADJUSTMENT,
        level: HeadingLevel::H2,
        stub: &["- "],
    },
    TemplateSection {
        title: FINAL_SCORE,
        level: HeadingLevel::H3,
        stub: &["- /5"],
    },
];

/// Sections that must contain at least one list item.
pub const BULLET_REQUIRED: [&str; 3] = [WHAT_HAPPENED, GRATEFUL_FOR, ONE_ADJUSTMENT];

/// Position of `title` in the template, if it is a template title.
pub fn section_index(title: &str) -> Option<usize> {
    SECTIONS.iter().position(|section| section.title == title)
}

pub fn section(title: &str) -> Option<&'static TemplateSection> {
    SECTIONS.iter().find(|section| section.title == title)
}

pub fn titles() -> impl Iterator<Item = &'static str> {
    SECTIONS.iter().map(|section| section.title)
}

const WEEKDAYS: [(Weekday, &str); 7] = [
    (Weekday::Mon, "Monday"),
    (Weekday::Tue, "Tuesday"),
    (Weekday::Wed, "Wednesday"),
    (Weekday::Thu, "Thursday"),
    (Weekday::Fri, "Friday"),
    (Weekday::Sat, "Saturday"),
    (Weekday::Sun, "Sunday"),
];

/// Full English name for a weekday, e.g. `Monday`.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAYS[weekday.num_days_from_monday() as usize].1
}

/// Title-cased weekday name for a case-insensitive match of `text`.
pub fn canonical_weekday(text: &str) -> Option<&'static str> {
    WEEKDAYS
        .iter()
        .find(|(_, name)| name.eq_ignore_ascii_case(text))
        .map(|(_, name)| *name)
}

pub fn allowed_weekdays() -> String {
    WEEKDAYS
        .iter()
        .map(|(_, name)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

static DAY_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^## (\d{4}-\d{2}-\d{2}) \(([^)]+)\)\s*$").expect("regex for day headers")
});
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{2,3}) (.+?)\s*$").expect("regex for headings"));
static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s*(.*)$").expect("regex for bullets"));
static SCORE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*-\s*([^/\s][^/]*?)?\s*/\s*5\s*$").expect("regex for score lines")
});
static HELPED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*-\s*\x{2B06}\x{FE0F}?\s*Helped today\s*:").expect("regex for helped")
});
static HURT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*-\s*\x{2B07}\x{FE0F}?\s*Hurt today\s*:").expect("regex for hurt")
});
static SHORT_TERM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*-\s*Short-term\s*:").expect("regex for short-term items")
});
static LONG_TERM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*-\s*Long-term\s*:").expect("regex for long-term items")
});
static WEEKDAY_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday)\b")
        .expect("regex for weekday prefix")
});

/// Raw pieces of a `## YYYY-MM-DD (label)` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayHeader<'a> {
    pub date: &'a str,
    pub label: &'a str,
}

pub fn parse_day_header(line: &str) -> Option<DayHeader<'_>> {
    let caps = DAY_HEADER_RE.captures(line)?;
    Some(DayHeader {
        date: caps.get(1)?.as_str(),
        label: caps.get(2)?.as_str().trim(),
    })
}

pub fn is_day_header(line: &str) -> bool {
    DAY_HEADER_RE.is_match(line)
}

/// Level and trimmed title of a `##`/`###` heading line.
pub fn parse_heading(line: &str) -> Option<(HeadingLevel, &str)> {
    let caps = HEADING_RE.captures(line)?;
    let level = HeadingLevel::from_marker(caps.get(1)?.as_str())?;
    Some((level, caps.get(2)?.as_str().trim()))
}

/// Payload after the bullet marker, or `None` when the line is not a bullet.
pub fn bullet_payload(line: &str) -> Option<&str> {
    BULLET_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|payload| payload.as_str())
}

pub fn is_bullet(line: &str) -> bool {
    BULLET_RE.is_match(line)
}

/// Classification of a line under `Final score (1/5)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreLine<'a> {
    /// `- /5` with nothing before the slash.
    Blank,
    Numerator(&'a str),
}

pub fn parse_score_line(line: &str) -> Option<ScoreLine<'_>> {
    let caps = SCORE_RE.captures(line)?;
    Some(match caps.get(1) {
        Some(numerator) => ScoreLine::Numerator(numerator.as_str().trim()),
        None => ScoreLine::Blank,
    })
}

pub fn is_helped_line(line: &str) -> bool {
    HELPED_RE.is_match(line)
}

pub fn is_hurt_line(line: &str) -> bool {
    HURT_RE.is_match(line)
}

pub fn is_short_term_line(line: &str) -> bool {
    SHORT_TERM_RE.is_match(line)
}

pub fn is_long_term_line(line: &str) -> bool {
    LONG_TERM_RE.is_match(line)
}

/// Leading weekday word of a header label, as written.
pub fn weekday_prefix(label: &str) -> Option<&str> {
    WEEKDAY_PREFIX_RE
        .captures(label.trim())
        .and_then(|caps| caps.get(1))
        .map(|day| day.as_str())
}

pub fn is_separator(line: &str) -> bool {
    line.trim() == SEPARATOR
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
