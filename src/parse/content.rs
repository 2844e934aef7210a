use crate::model::{Entry, SectionInfo};
use crate::problems::{Problem, ProblemContext};
use crate::template::{self, ScoreLine};

const SCORE_MIN: f64 = 0.0;
const SCORE_MAX: f64 = 5.0;

/// Run per-section content rules for every recorded section.
pub(super) fn validate_section_content(entry: &mut Entry) {
    let Entry {
        sections, problems, ..
    } = entry;
    let has_narrative = sections
        .get(template::WHAT_HAPPENED)
        .map(|section| has_genuine_content(&section.content_lines))
        .unwrap_or(false);

    for title in template::titles() {
        let Some(section) = sections.get(title) else {
            continue;
        };
        let content = content_lines(&section.content_lines);
        let has_bullet = content.iter().any(|line| template::is_bullet(line));
        if template::BULLET_REQUIRED.contains(&title) && !has_bullet {
            problems.push(Problem::new(
                ProblemContext::MissingBullet {
                    section_title: title.to_string(),
                },
                format!("section '{title}' has no list items"),
                Some(section.line_no),
            ));
        }
        match title {
            template::LOOKING_FORWARD => validate_looking_forward(problems, section, &content),
            template::SIGNALS => validate_signals(problems, section, &content),
            template::FINAL_SCORE => validate_score(problems, section, &content, has_narrative),
            _ => {}
        }
    }
}

/// Section lines with separator lines removed.
fn content_lines(lines: &[String]) -> Vec<&str> {
    lines
        .iter()
        .map(String::as_str)
        .filter(|line| !template::is_separator(line))
        .collect()
}

/// True when some line carries text; a bullet only counts with a payload.
fn has_genuine_content(lines: &[String]) -> bool {
    content_lines(lines).into_iter().any(|line| {
        if template::is_blank(line) {
            return false;
        }
        match template::bullet_payload(line) {
            Some(payload) => !payload.trim().is_empty(),
            None => true,
        }
    })
}

fn validate_looking_forward(problems: &mut Vec<Problem>, section: &SectionInfo, content: &[&str]) {
    if !content.iter().any(|line| template::is_short_term_line(line)) {
        problems.push(Problem::new(
            ProblemContext::MissingShortTerm,
            "missing 'Short-term' item in 'What I'm looking forward to'",
            Some(section.line_no),
        ));
    }
    if !content.iter().any(|line| template::is_long_term_line(line)) {
        problems.push(Problem::new(
            ProblemContext::MissingLongTerm,
            "missing 'Long-term' item in 'What I'm looking forward to'",
            Some(section.line_no),
        ));
    }
}

fn validate_signals(problems: &mut Vec<Problem>, section: &SectionInfo, content: &[&str]) {
    if !content.iter().any(|line| template::is_helped_line(line)) {
        problems.push(Problem::new(
            ProblemContext::MissingHelped,
            "missing 'Helped today' item in 'Signals'",
            Some(section.line_no),
        ));
    }
    if !content.iter().any(|line| template::is_hurt_line(line)) {
        problems.push(Problem::new(
            ProblemContext::MissingHurt,
            "missing 'Hurt today' item in 'Signals'",
            Some(section.line_no),
        ));
    }
}

fn validate_score(
    problems: &mut Vec<Problem>,
    section: &SectionInfo,
    content: &[&str],
    has_narrative: bool,
) {
    let numerators: Vec<&str> = content
        .iter()
        .filter_map(|line| match template::parse_score_line(line) {
            Some(ScoreLine::Numerator(raw)) => Some(raw),
            _ => None,
        })
        .collect();

    if numerators.is_empty() {
        // Placeholder days with an empty narrative are not asked for a score.
        if has_narrative {
            problems.push(Problem::new(
                ProblemContext::MissingScore,
                "missing score entry in 'Final score (1/5)'",
                Some(section.line_no),
            ));
        }
        return;
    }

    for raw in numerators {
        if let Some(problem) = check_score(raw, section.line_no) {
            problems.push(problem);
        }
    }
}

fn check_score(raw: &str, line_no: usize) -> Option<Problem> {
    let value = match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            return Some(Problem::new(
                ProblemContext::InvalidScore {
                    score: raw.to_string(),
                },
                "invalid score value in 'Final score (1/5)'",
                Some(line_no),
            ));
        }
    };
    if (SCORE_MIN..=SCORE_MAX).contains(&value) {
        return None;
    }
    Some(Problem::new(
        ProblemContext::ScoreOutOfRange {
            score: raw.to_string(),
        },
        format!("score {raw} must be between 0 and 5"),
        Some(line_no),
    ))
}
