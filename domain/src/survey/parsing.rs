//! Survey reply parsing.
//!
//! Turns a free-form model reply into an [`AnswerVector`]. Pure domain logic:
//! no I/O, no logging. Anything the parser had to drop is reported as a
//! [`ParseIssue`] so the caller can log it.
//!
//! # Expected reply shape
//!
//! ```text
//! 题号1：2
//! 问题2：非常同意
//! 3: 1
//! ```
//!
//! One `id：answer` pair per line. The full-width colon is tried first, the
//! half-width colon only when that does not give exactly two segments.
//!
//! # Outcomes
//!
//! | Situation | Slot value | Issue |
//! |-----------|------------|-------|
//! | No reply at all | `NO_RESPONSE` everywhere | none |
//! | Line without a usable separator | unaffected | [`ParseIssue::UnparseableLine`] |
//! | Id segment not an integer | unaffected | [`ParseIssue::UnparseableLine`] |
//! | Id not in the survey | unaffected | [`ParseIssue::InvalidQuestionId`] |
//! | Id never answered | `MISSING` | none |
//!
//! # Examples
//!
//! ```
//! use std::collections::BTreeSet;
//! use survey_domain::survey::parsing::parse_response;
//!
//! let ids: BTreeSet<u32> = [1, 2].into_iter().collect();
//! let answers = parse_response(Some("题号1：A\n2:B"), &ids);
//! assert_eq!(answers.as_slice(), ["A", "B"]);
//!
//! let answers = parse_response(Some("1：A"), &ids);
//! assert_eq!(answers.as_slice(), ["A", "MISSING"]);
//! ```

use super::answer::{AnswerVector, Sentinel};
use std::collections::{BTreeSet, HashMap};

const FULL_WIDTH_COLON: char = '：';
const HALF_WIDTH_COLON: char = ':';

/// Label words models put in front of the question number
const ID_MARKERS: [&str; 2] = ["题号", "问题"];

/// Why a line could not be decomposed into id + answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFault {
    /// Neither colon variant split the line into exactly two segments
    NoSeparator,
    /// The segment before the colon is not an integer
    BadQuestionId,
}

impl LineFault {
    pub fn describe(&self) -> &'static str {
        match self {
            LineFault::NoSeparator => "no single id/answer separator",
            LineFault::BadQuestionId => "question id is not a number",
        }
    }
}

/// A line the parser dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseIssue {
    UnparseableLine { line: String, fault: LineFault },
    InvalidQuestionId { id: i64, line: String },
}

impl ParseIssue {
    /// The offending line, trimmed
    pub fn line(&self) -> &str {
        match self {
            ParseIssue::UnparseableLine { line, .. } | ParseIssue::InvalidQuestionId { line, .. } => {
                line
            }
        }
    }
}

/// Answers plus diagnostics for a single parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReport {
    pub answers: AnswerVector,
    pub issues: Vec<ParseIssue>,
    /// Expected ids that received no answer
    pub missing: usize,
    /// The provider returned nothing
    pub no_response: bool,
}

impl ParseReport {
    pub fn unparseable_lines(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i, ParseIssue::UnparseableLine { .. }))
            .count()
    }

    pub fn invalid_ids(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i, ParseIssue::InvalidQuestionId { .. }))
            .count()
    }

    /// Every expected id got an answer
    pub fn is_complete(&self) -> bool {
        !self.no_response && self.missing == 0
    }
}

/// Parse a model reply into an answer vector of length `expected_ids.len()`.
///
/// See the module documentation for the line format and outcome table.
pub fn parse_response(raw: Option<&str>, expected_ids: &BTreeSet<u32>) -> AnswerVector {
    parse_response_with_report(raw, expected_ids).answers
}

/// Same as [`parse_response`], also returning what was dropped.
pub fn parse_response_with_report(
    raw: Option<&str>,
    expected_ids: &BTreeSet<u32>,
) -> ParseReport {
    let text = match raw {
        Some(text) if !text.is_empty() => text,
        _ => {
            return ParseReport {
                answers: AnswerVector::no_response(expected_ids.len()),
                issues: Vec::new(),
                missing: 0,
                no_response: true,
            };
        }
    };

    let mut extracted: HashMap<u32, String> = HashMap::new();
    let mut issues = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_line(line) {
            Ok((id, answer)) => match u32::try_from(id) {
                Ok(id) if expected_ids.contains(&id) => {
                    // Later lines overwrite earlier ones
                    extracted.insert(id, answer.to_string());
                }
                _ => issues.push(ParseIssue::InvalidQuestionId {
                    id,
                    line: line.to_string(),
                }),
            },
            Err(fault) => issues.push(ParseIssue::UnparseableLine {
                line: line.to_string(),
                fault,
            }),
        }
    }

    let mut missing = 0;
    let slots = expected_ids
        .iter()
        .map(|id| match extracted.remove(id) {
            Some(answer) => answer,
            None => {
                missing += 1;
                Sentinel::Missing.as_str().to_string()
            }
        })
        .collect();

    ParseReport {
        answers: AnswerVector::from_slots(slots),
        issues,
        missing,
        no_response: false,
    }
}

/// Decompose one non-blank line into `(question id, answer text)`.
fn parse_line(line: &str) -> Result<(i64, &str), LineFault> {
    let (id_part, answer) = split_pair(line, FULL_WIDTH_COLON)
        .or_else(|| split_pair(line, HALF_WIDTH_COLON))
        .ok_or(LineFault::NoSeparator)?;

    let mut id_str = id_part.trim().to_string();
    for marker in ID_MARKERS {
        id_str = id_str.replace(marker, "");
    }

    let id = ascii_digits(id_str.trim())
        .parse::<i64>()
        .map_err(|_| LineFault::BadQuestionId)?;

    Ok((id, answer.trim()))
}

/// Full-width digits (`０`..`９`) become their ASCII forms.
fn ascii_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Split on `sep` only when it occurs exactly once.
fn split_pair(line: &str, sep: char) -> Option<(&str, &str)> {
    let (head, tail) = line.split_once(sep)?;
    if tail.contains(sep) {
        None
    } else {
        Some((head, tail))
    }
}
