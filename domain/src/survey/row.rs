//! Result row for one (persona, model) exchange

use super::answer::AnswerVector;
use super::question::Survey;
use crate::persona::entities::PersonaType;

/// Leading columns of every result file, before the answer columns
pub const ROW_KEY_COLUMNS: [&str; 3] = ["persona_id", "persona_type", "model"];

/// One line of a result file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    pub persona_id: String,
    pub persona_type: PersonaType,
    pub model: String,
    pub answers: AnswerVector,
}

impl OutputRow {
    /// Header for a result file: key columns then `q{id}` in ascending id order
    pub fn header(survey: &Survey) -> Vec<String> {
        ROW_KEY_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(survey.answer_columns())
            .collect()
    }

    /// Flatten into record fields aligned with [`OutputRow::header`]
    pub fn to_record(&self) -> Vec<String> {
        let mut record = Vec::with_capacity(ROW_KEY_COLUMNS.len() + self.answers.len());
        record.push(self.persona_id.clone());
        record.push(self.persona_type.as_str().to_string());
        record.push(self.model.clone());
        record.extend(self.answers.iter().map(str::to_string));
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::question::Question;

    #[test]
    fn test_header_and_record_align() {
        let survey = Survey::new(vec![
            Question::new(2, "B", vec![]),
            Question::new(1, "A", vec![]),
        ])
        .unwrap();
        let header = OutputRow::header(&survey);
        assert_eq!(header, ["persona_id", "persona_type", "model", "q1", "q2"]);

        let row = OutputRow {
            persona_id: "gen_1".to_string(),
            persona_type: PersonaType::General,
            model: "gpt-4o".to_string(),
            answers: AnswerVector::no_response(2),
        };
        let record = row.to_record();
        assert_eq!(record.len(), header.len());
        assert_eq!(
            record,
            ["gen_1", "general", "gpt-4o", "NO_RESPONSE", "NO_RESPONSE"]
        );
    }
}
