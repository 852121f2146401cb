use super::{LoadError, read_file};
use std::path::Path;
use survey_domain::{DomainError, PromptTemplate};
use survey_domain::prompt::{PERSONA_DESCRIPTION, SURVEY_QUESTIONS_FORMATTED};
use tracing::warn;

/// Read a prompt template and check its placeholders up front
///
/// A template that never mentions the persona or the questions still loads,
/// with a warning per absent placeholder.
pub fn load_template(path: &Path) -> Result<PromptTemplate, LoadError> {
    let template = PromptTemplate::new(read_file(path)?);
    let missing = missing_placeholders(&template).map_err(|source| LoadError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;
    for name in missing {
        warn!("Template {} never uses {{{}}}", path.display(), name);
    }
    Ok(template)
}

/// Required placeholders the template does not reference; errors on an
/// unknown placeholder or malformed braces
fn missing_placeholders(template: &PromptTemplate) -> Result<Vec<&'static str>, DomainError> {
    template.validate()?;
    let used = template.placeholders()?;
    Ok([PERSONA_DESCRIPTION, SURVEY_QUESTIONS_FORMATTED]
        .into_iter()
        .filter(|name| !used.contains(name))
        .collect())
}
