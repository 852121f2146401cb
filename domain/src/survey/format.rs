//! Survey block rendering for prompts

use super::question::Question;

/// Render the questions as the block inserted into prompt templates.
///
/// Each question becomes `"{id}. {text}\n   {options joined by spaces}"`,
/// and questions are separated by a blank line. The model is asked to answer
/// with `"{id}：{answer}"` lines, which is what
/// [`parse_response`](super::parsing::parse_response) expects back.
pub fn format_survey(questions: &[Question]) -> String {
    questions
        .iter()
        .map(|q| format!("{}. {}\n   {}", q.id, q.text, q.options.join(" ")))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_two_questions() {
        let questions = vec![
            Question::new(1, "您的性别？", vec!["1.男".into(), "2.女".into()]),
            Question::new(2, "您是否满意？", vec!["1.是".into(), "2.否".into()]),
        ];
        assert_eq!(
            format_survey(&questions),
            "1. 您的性别？\n   1.男 2.女\n\n2. 您是否满意？\n   1.是 2.否"
        );
    }

    #[test]
    fn test_format_question_without_options() {
        let questions = vec![Question::new(7, "Open", vec![])];
        assert_eq!(format_survey(&questions), "7. Open\n   ");
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(format_survey(&[]), "");
    }
}
