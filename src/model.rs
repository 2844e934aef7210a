//! Parsed journal entries and their sections.
use crate::problems::Problem;
use crate::template::{self, HeadingLevel};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// One recognized template section inside an entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionInfo {
    pub title: String,
    pub level: HeadingLevel,
    /// 1-based line of the section heading.
    pub line_no: usize,
    /// Raw lines up to the next recognized heading or the end of the entry.
    pub content_lines: Vec<String>,
}

/// One calendar day's block of lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Date exactly as written in the header.
    pub date_str: String,
    pub date: Option<NaiveDate>,
    /// Text between the header parentheses, trimmed.
    pub weekday_header: String,
    /// Title-cased weekday when the label starts with a valid day name.
    pub weekday_name: Option<String>,
    /// 1-based line of the day header.
    pub line_no: usize,
    pub sections: BTreeMap<String, SectionInfo>,
    pub problems: Vec<Problem>,
}

impl Entry {
    pub fn new(date_str: &str, weekday_header: &str, line_no: usize) -> Self {
        Self {
            date_str: date_str.to_string(),
            date: None,
            weekday_header: weekday_header.to_string(),
            weekday_name: None,
            line_no,
            sections: BTreeMap::new(),
            problems: Vec::new(),
        }
    }

    /// Weekday implied by the parsed date.
    pub fn actual_weekday(&self) -> Option<&'static str> {
        self.date.map(|date| template::weekday_name(date.weekday()))
    }

    /// `Some(true)` when the stated weekday agrees with the date, `None` when
    /// either side is unknown.
    pub fn weekday_matches(&self) -> Option<bool> {
        let actual = self.actual_weekday()?;
        let stated = self.weekday_name.as_deref()?;
        Some(stated.eq_ignore_ascii_case(actual))
    }

    /// Template titles present in this entry, in template order.
    pub fn present_titles(&self) -> Vec<&'static str> {
        template::titles()
            .filter(|title| self.sections.contains_key(*title))
            .collect()
    }

    pub fn missing_titles(&self) -> Vec<&'static str> {
        template::titles()
            .filter(|title| !self.sections.contains_key(*title))
            .collect()
    }
}

/// Split document text into lines without terminators.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

/// Join lines back into document text with a trailing newline.
pub fn join_lines(lines: &[String]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
