use super::{LoadError, parse_json};
use std::path::Path;
use survey_domain::{Question, Survey};
use tracing::info;

/// Load and validate the survey definition (JSON array of questions)
pub fn load_survey(path: &Path) -> Result<Survey, LoadError> {
    let questions: Vec<Question> = parse_json(path)?;
    let survey = Survey::new(questions).map_err(|source| LoadError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loaded {} questions from {}", survey.len(), path.display());
    Ok(survey)
}
