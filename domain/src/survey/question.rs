//! Question and Survey value objects

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single survey question (Value Object)
///
/// Deserialized directly from the survey JSON file:
///
/// ```json
/// {"id": 1, "text": "您对目前的生活满意吗？", "options": ["1.非常满意", "2.满意"]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
    #[serde(default)]
    pub options: Vec<String>,
}

impl Question {
    pub fn new(id: u32, text: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            id,
            text: text.into(),
            options,
        }
    }

    /// Column name used for this question in result files (`q{id}`)
    pub fn column_name(&self) -> String {
        format!("q{}", self.id)
    }
}

/// A validated, immutable survey definition
///
/// Keeps the questions in their original order (used for prompt formatting)
/// and the set of expected ids in ascending order (used for answer slots and
/// result columns).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Survey {
    questions: Vec<Question>,
    expected_ids: BTreeSet<u32>,
}

impl Survey {
    /// Build a survey, rejecting empty lists, zero ids and duplicate ids.
    pub fn new(questions: Vec<Question>) -> Result<Self, DomainError> {
        if questions.is_empty() {
            return Err(DomainError::EmptySurvey);
        }

        let mut expected_ids = BTreeSet::new();
        for question in &questions {
            if question.id == 0 {
                return Err(DomainError::InvalidQuestionId(question.id));
            }
            if !expected_ids.insert(question.id) {
                return Err(DomainError::DuplicateQuestionId(question.id));
            }
        }

        Ok(Self {
            questions,
            expected_ids,
        })
    }

    /// Questions in definition order
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Question ids in ascending order
    pub fn expected_ids(&self) -> &BTreeSet<u32> {
        &self.expected_ids
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Answer column names (`q1`, `q2`, ...) in ascending id order
    pub fn answer_columns(&self) -> Vec<String> {
        self.expected_ids.iter().map(|id| format!("q{}", id)).collect()
    }
}
