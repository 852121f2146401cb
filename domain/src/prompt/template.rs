//! Persona prompt templates

use crate::core::error::DomainError;

/// Placeholder replaced by the persona's first-person description
pub const PERSONA_DESCRIPTION: &str = "persona_description";

/// Placeholder replaced by the output of [`format_survey`](crate::format_survey)
pub const SURVEY_QUESTIONS_FORMATTED: &str = "survey_questions_formatted";

/// System message sent alongside every persona prompt
pub const DEFAULT_SYSTEM_PROMPT: &str = "你是一个正在参与社会调查的受访者。";

/// A persona prompt template loaded from disk
///
/// Uses `{name}` placeholders. `{{` and `}}` produce literal braces.
/// Only [`PERSONA_DESCRIPTION`] and [`SURVEY_QUESTIONS_FORMATTED`] are
/// supplied; any other name is an error rather than being left in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    source: String,
}

enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

impl PromptTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Fill the template for one persona.
    pub fn compose(
        &self,
        persona_description: &str,
        survey_formatted: &str,
    ) -> Result<String, DomainError> {
        let mut out = String::with_capacity(
            self.source.len() + persona_description.len() + survey_formatted.len(),
        );

        for segment in self.segments()? {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(PERSONA_DESCRIPTION) => out.push_str(persona_description),
                Segment::Placeholder(SURVEY_QUESTIONS_FORMATTED) => out.push_str(survey_formatted),
                Segment::Placeholder(other) => {
                    return Err(DomainError::UnknownPlaceholder(other.to_string()));
                }
            }
        }

        Ok(out)
    }

    /// Check the template without composing it.
    ///
    /// Lets loaders reject a bad template before any provider call is made.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.compose("", "").map(|_| ())
    }

    /// Placeholder names referenced by the template, in order of appearance
    pub fn placeholders(&self) -> Result<Vec<&str>, DomainError> {
        Ok(self
            .segments()?
            .into_iter()
            .filter_map(|s| match s {
                Segment::Placeholder(name) => Some(name),
                Segment::Literal(_) => None,
            })
            .collect())
    }

    fn segments(&self) -> Result<Vec<Segment<'_>>, DomainError> {
        let src = self.source.as_str();
        let mut segments = Vec::new();
        let mut literal_start = 0;
        let mut chars = src.char_indices().peekable();

        while let Some((idx, c)) = chars.next() {
            match c {
                '{' | '}' if chars.peek().map(|&(_, next)| next) == Some(c) => {
                    // Escaped brace: keep one, skip the second
                    segments.push(Segment::Literal(&src[literal_start..idx + 1]));
                    chars.next();
                    literal_start = idx + 2;
                }
                '{' => {
                    segments.push(Segment::Literal(&src[literal_start..idx]));
                    let name_start = idx + 1;
                    let close = src[name_start..].find(['{', '}']).ok_or_else(|| {
                        DomainError::MalformedTemplate(format!(
                            "unterminated '{{' at byte {}",
                            idx
                        ))
                    })?;
                    let name_end = name_start + close;
                    if src[name_end..].starts_with('{') {
                        return Err(DomainError::MalformedTemplate(format!(
                            "nested '{{' at byte {}",
                            name_end
                        )));
                    }
                    segments.push(Segment::Placeholder(&src[name_start..name_end]));
                    // Skip past the closing brace
                    while let Some(&(i, _)) = chars.peek() {
                        if i > name_end {
                            break;
                        }
                        chars.next();
                    }
                    literal_start = name_end + 1;
                }
                '}' => {
                    return Err(DomainError::MalformedTemplate(format!(
                        "single '}}' at byte {}",
                        idx
                    )));
                }
                _ => {}
            }
        }

        segments.push(Segment::Literal(&src[literal_start..]));
        Ok(segments)
    }
}

impl From<&str> for PromptTemplate {
    fn from(s: &str) -> Self {
        PromptTemplate::new(s)
    }
}

impl From<String> for PromptTemplate {
    fn from(s: String) -> Self {
        PromptTemplate::new(s)
    }
}
