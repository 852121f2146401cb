//! CLI entrypoint for persona-survey
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use survey_application::{
    NoProgress, ProviderClient, RunSimulationInput, RunSimulationUseCase, RunSummary,
    SimulationProgressNotifier,
};
use survey_domain::{PersonaType, ProviderConfig, Survey};
use survey_infrastructure::config::{FileModelEntry, group_models, parse_model_arg};
use survey_infrastructure::{
    ConfigLoader, CsvResultSink, FileConfig, JsonlResponseLogger, RoutingProviderClient,
    default_adapters, has_adapter, load_personas, load_survey, load_template,
};
use survey_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

const LOG_FILE_PREFIX: &str = "persona-survey.log";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Held until exit so the file writer drains its buffer
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_ref());

    info!("Starting persona-survey");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    if !cli.model.is_empty() {
        config.models = model_overrides(&cli.model)?;
    }

    let provider_config = config.providers.to_provider_config();
    check_config(&config, &provider_config)?;

    let survey = load_survey(&config.data.survey).context("Survey definition is required")?;
    info!("Survey has {} questions", survey.len());

    // === Dependency Injection ===
    let client: Arc<dyn ProviderClient> = Arc::new(RoutingProviderClient::new(
        default_adapters(&provider_config),
        provider_config,
        config.retry.to_policy(),
    ));

    let mut use_case = RunSimulationUseCase::new(client, config.simulation.to_params());

    let response_log = cli
        .response_log
        .clone()
        .or_else(|| config.output.response_log.clone());
    if let Some(path) = response_log
        && let Some(logger) = JsonlResponseLogger::new(&path)
    {
        info!("Recording responses to {}", logger.path().display());
        use_case = use_case.with_response_logger(Arc::new(logger));
    }

    let progress = progress_notifier(cli.quiet, cli.plain);

    // === Runs, one per persona type ===
    let mut summaries: Vec<RunSummary> = Vec::new();
    let mut skipped: Vec<(PersonaType, String)> = Vec::new();

    for persona_type in cli.persona_types() {
        match run_persona_type(persona_type, &config, &survey, &use_case, progress.as_ref()).await {
            Ok(summary) => summaries.push(summary),
            Err(reason) => {
                warn!("Skipping {} personas: {}", persona_type, reason);
                skipped.push((persona_type, reason));
            }
        }
    }

    println!("{}", ConsoleFormatter::format(&summaries, &skipped));

    Ok(())
}

/// One persona-type run. A returned `Err` carries the reason the run was
/// skipped or stopped; it never aborts the other runs.
async fn run_persona_type(
    persona_type: PersonaType,
    config: &FileConfig,
    survey: &Survey,
    use_case: &RunSimulationUseCase,
    progress: &dyn SimulationProgressNotifier,
) -> std::result::Result<RunSummary, String> {
    let data = &config.data;

    let template = load_template(&data.prompt_path(persona_type)).map_err(|e| e.to_string())?;

    let personas = load_personas(
        persona_type,
        data.persona_source(persona_type),
        &config.personas.to_options(),
    )
    .map_err(|e| e.to_string())?;
    if personas.is_empty() {
        return Err("no personas loaded".to_string());
    }

    let output_path = data.output_path(persona_type);
    let mut sink = CsvResultSink::create(&output_path)
        .map_err(|e| format!("cannot create {}: {}", output_path.display(), e))?;

    let input = RunSimulationInput::new(
        persona_type,
        personas,
        template,
        survey.clone(),
        config.provider_models(),
    );

    match use_case.execute(input, &mut sink, progress).await {
        Ok(summary) => {
            info!(
                "Wrote {} rows for {} personas to {}",
                summary.rows_written,
                persona_type,
                sink.path().display()
            );
            Ok(summary)
        }
        Err(e) => {
            error!("{} run failed: {}", persona_type, e);
            Err(e.to_string())
        }
    }
}

fn progress_notifier(quiet: bool, plain: bool) -> Box<dyn SimulationProgressNotifier> {
    if quiet {
        Box::new(NoProgress)
    } else if plain {
        Box::new(SimpleProgress)
    } else {
        Box::new(ProgressReporter::new())
    }
}

/// Log every configuration issue; errors are fatal
fn check_config(config: &FileConfig, providers: &ProviderConfig) -> Result<()> {
    let issues = config.validate(|kind| has_adapter(providers, kind));
    let mut errors = 0;
    for issue in &issues {
        if issue.is_error() {
            error!("{}", issue.message);
            errors += 1;
        } else {
            warn!("{}", issue.message);
        }
    }
    if errors > 0 {
        bail!("Configuration has {} error(s)", errors);
    }
    Ok(())
}

/// Replace the configured models with `-m provider:model` arguments
fn model_overrides(args: &[String]) -> Result<Vec<FileModelEntry>> {
    let pairs = args
        .iter()
        .map(|arg| parse_model_arg(arg).ok_or_else(|| anyhow!("Invalid model argument '{}'", arg)))
        .collect::<Result<Vec<_>>>()?;
    Ok(group_models(pairs))
}

fn verbosity_filter(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    }
}

/// stderr logging by verbosity, plus a daily file when `log_dir` is given
fn init_logging(verbose: u8, log_dir: Option<&PathBuf>) -> Option<WorkerGuard> {
    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(verbosity_filter(verbose))
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_overrides_group_by_provider() {
        let args = vec![
            "openai:gpt-4o".to_string(),
            "glm-4".to_string(),
            "openai:gpt-3.5-turbo".to_string(),
        ];
        let entries = model_overrides(&args).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].provider, "openai");
        assert_eq!(entries[0].names, vec!["gpt-4o", "gpt-3.5-turbo"]);
        assert_eq!(entries[1].provider, "zhipuai");
        assert_eq!(entries[1].names, vec!["glm-4"]);
    }

    #[test]
    fn test_model_overrides_reject_empty_parts() {
        assert!(model_overrides(&["openai:".to_string()]).is_err());
        assert!(model_overrides(&["  ".to_string()]).is_err());
    }

    use survey_infrastructure::config::ConfigIssueCode;

    fn offline(config: &FileConfig) -> ProviderConfig {
        config.providers.resolve_with(&|_| None)
    }

    #[test]
    fn test_default_config_passes_checks() {
        let config = FileConfig::default();
        assert!(check_config(&config, &offline(&config)).is_ok());
    }

    #[test]
    fn test_invalid_temperature_is_fatal() {
        let mut config = FileConfig::default();
        config.simulation.temperature = 1.5;
        assert!(check_config(&config, &offline(&config)).is_err());
    }

    #[test]
    fn test_compatible_model_without_base_url_is_flagged() {
        let mut config = FileConfig::default();
        config.providers.openai.base_url = None;
        config.models = vec![FileModelEntry::new(
            "openai_compatible",
            &["Qwen2-72B-Instruct"],
        )];

        let providers = offline(&config);
        let issues = config.validate(|kind| has_adapter(&providers, kind));
        assert!(issues.iter().any(|i| matches!(
            i.code,
            ConfigIssueCode::ProviderNotImplemented { .. }
        )));

        config.providers.openai.base_url = Some("http://localhost:8000/v1".to_string());
        let providers = offline(&config);
        assert!(config.validate(|kind| has_adapter(&providers, kind)).is_empty());
    }
}
