//! Persona loaders, one per [`PersonaType`].

use super::{LoadError, parse_json};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::path::Path;
use survey_domain::{CognitiveProfile, DemographicProfile, Persona, PersonaType};
use tracing::{info, warn};

/// How general personas are synthesized from the snippet corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralPersonaOptions {
    pub count: usize,
    pub sentences_per_persona: usize,
    pub seed: Option<u64>,
}

impl Default for GeneralPersonaOptions {
    fn default() -> Self {
        Self {
            count: 10,
            sentences_per_persona: 5,
            seed: None,
        }
    }
}

/// Load the personas for one type from its source file
pub fn load_personas(
    persona_type: PersonaType,
    path: &Path,
    general: &GeneralPersonaOptions,
) -> Result<Vec<Persona>, LoadError> {
    let personas = match persona_type {
        PersonaType::General => load_general_personas(path, general)?,
        PersonaType::Silicon => load_silicon_personas(path)?,
        PersonaType::Cognitive => load_cognitive_personas(path)?,
    };
    info!(
        "Loaded {} {} personas from {}",
        personas.len(),
        persona_type,
        path.display()
    );
    Ok(personas)
}

/// General personas from a JSON array of snippet strings
pub fn load_general_personas(
    path: &Path,
    options: &GeneralPersonaOptions,
) -> Result<Vec<Persona>, LoadError> {
    let snippets: Vec<String> = parse_json(path)?;
    Ok(sample_general_personas(&snippets, options))
}

/// Build `options.count` personas, each from distinct randomly chosen
/// snippets joined by a space.
///
/// With fewer snippets than requested, every persona uses all of them in a
/// shuffled order.
pub fn sample_general_personas(
    snippets: &[String],
    options: &GeneralPersonaOptions,
) -> Vec<Persona> {
    if snippets.is_empty() {
        return Vec::new();
    }

    let per_persona = options.sentences_per_persona.max(1);
    if snippets.len() < per_persona {
        warn!(
            "Only {} snippets available, fewer than the {} requested per persona",
            snippets.len(),
            per_persona
        );
    }
    let take = per_persona.min(snippets.len());

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut pool: Vec<&str> = snippets.iter().map(String::as_str).collect();

    (0..options.count)
        .map(|i| {
            let (picked, _) = pool.partial_shuffle(&mut rng, take);
            Persona::new(
                Persona::generated_id(PersonaType::General, i),
                picked.join(" "),
            )
        })
        .collect()
}

/// Silicon personas from the demographics CSV
///
/// Rows without an `id` get `sil_{row}` (1-based).
pub fn load_silicon_personas(path: &Path) -> Result<Vec<Persona>, LoadError> {
    let csv_error = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_error)?;

    reader
        .deserialize::<DemographicProfile>()
        .enumerate()
        .map(|(index, row)| -> Result<Persona, LoadError> {
            let profile = row.map_err(csv_error)?;
            Ok(Persona::new(
                persona_id(&profile.id, PersonaType::Silicon, index),
                profile.describe(),
            ))
        })
        .collect()
}

/// Cognitive personas from a JSON array of profiles
pub fn load_cognitive_personas(path: &Path) -> Result<Vec<Persona>, LoadError> {
    let profiles: Vec<CognitiveProfile> = parse_json(path)?;
    Ok(profiles
        .iter()
        .enumerate()
        .map(|(index, profile)| {
            Persona::new(
                persona_id(&profile.id, PersonaType::Cognitive, index),
                profile.describe(),
            )
        })
        .collect())
}

fn persona_id(id: &Option<String>, persona_type: PersonaType, index: usize) -> String {
    match id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => Persona::generated_id(persona_type, index),
    }
}
