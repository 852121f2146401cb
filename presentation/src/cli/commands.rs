//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use survey_domain::PersonaType;

/// Persona type selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PersonaTypeArg {
    /// Personas sampled from conversational snippets
    General,
    /// Personas built from demographic survey rows
    Silicon,
    /// Personas with personality, values and life narrative
    Cognitive,
}

impl From<PersonaTypeArg> for PersonaType {
    fn from(arg: PersonaTypeArg) -> Self {
        match arg {
            PersonaTypeArg::General => PersonaType::General,
            PersonaTypeArg::Silicon => PersonaType::Silicon,
            PersonaTypeArg::Cognitive => PersonaType::Cognitive,
        }
    }
}

/// CLI arguments for persona-survey
#[derive(Parser, Debug)]
#[command(name = "persona-survey")]
#[command(author, version, about = "Simulate survey responses with LLM personas")]
#[command(long_about = r#"
persona-survey asks every configured model to answer a fixed questionnaire
in the voice of each persona, and writes one CSV row per (persona, model).

Each persona type is a separate run with its own prompt template and
output file (results_<type>_persona.csv in the output directory).

Configuration files are loaded from (in priority order):
1. PERSONA_SURVEY_* environment variables
2. --config <path>     Explicit config file
3. ./survey.toml       Project-level config
4. ~/.config/persona-survey/config.toml   Global config

Example:
  persona-survey
  persona-survey --persona-type silicon -m openai:gpt-4o -m zhipuai:glm-4
  persona-survey --persona-type general --response-log logs/responses.jsonl
"#)]
pub struct Cli {
    /// Persona types to simulate (can be specified multiple times; default all)
    #[arg(long = "persona-type", value_enum, value_name = "TYPE")]
    pub persona_type: Vec<PersonaTypeArg>,

    /// Models to query as provider:model (can be specified multiple times)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Vec<String>,

    /// Append every exchange to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub response_log: Option<PathBuf>,

    /// Also write diagnostics to a daily log file in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Print one plain line per call instead of a progress bar
    #[arg(long, conflicts_with = "quiet")]
    pub plain: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Selected persona types in first-mention order, all types if none given
    pub fn persona_types(&self) -> Vec<PersonaType> {
        if self.persona_type.is_empty() {
            return PersonaType::all().to_vec();
        }
        let mut types: Vec<PersonaType> = Vec::with_capacity(self.persona_type.len());
        for arg in &self.persona_type {
            let persona_type = PersonaType::from(*arg);
            if !types.contains(&persona_type) {
                types.push(persona_type);
            }
        }
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_run_every_type() {
        let cli = Cli::parse_from(["persona-survey"]);
        assert_eq!(
            cli.persona_types(),
            vec![
                PersonaType::General,
                PersonaType::Silicon,
                PersonaType::Cognitive
            ]
        );
        assert!(cli.model.is_empty());
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert!(!cli.plain);
    }

    #[test]
    fn test_plain_conflicts_with_quiet() {
        assert!(Cli::parse_from(["persona-survey", "--plain"]).plain);
        assert!(Cli::try_parse_from(["persona-survey", "--plain", "-q"]).is_err());
    }

    #[test]
    fn test_repeated_flags() {
        let cli = Cli::parse_from([
            "persona-survey",
            "--persona-type",
            "cognitive",
            "--persona-type",
            "silicon",
            "--persona-type",
            "cognitive",
            "-m",
            "openai:gpt-4o",
            "--model",
            "glm-4",
            "-vv",
            "-q",
        ]);
        assert_eq!(
            cli.persona_types(),
            vec![PersonaType::Cognitive, PersonaType::Silicon]
        );
        assert_eq!(cli.model, vec!["openai:gpt-4o", "glm-4"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.quiet);
    }

    #[test]
    fn test_unknown_persona_type_is_rejected() {
        assert!(Cli::try_parse_from(["persona-survey", "--persona-type", "robot"]).is_err());
    }

    #[test]
    fn test_paths() {
        let cli = Cli::parse_from([
            "persona-survey",
            "--config",
            "custom.toml",
            "--response-log",
            "out/log.jsonl",
            "--log-dir",
            "logs",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert_eq!(cli.response_log, Some(PathBuf::from("out/log.jsonl")));
        assert_eq!(cli.log_dir, Some(PathBuf::from("logs")));
    }
}
