//! Run Simulation use case.
//!
//! Drives one persona-type run: every persona is asked the whole survey by
//! every configured model, one call at a time, and each reply becomes one
//! [`OutputRow`] in the result sink.
//!
//! Call order is persona-major: for each persona, models are visited in
//! provider order and then in the order listed for that provider.

use crate::config::SimulationParams;
use crate::ports::progress::{CallOutcome, SimulationProgressNotifier};
use crate::ports::provider_client::ProviderClient;
use crate::ports::response_logger::{NoResponseLogger, ResponseEvent, ResponseLogger};
use crate::ports::result_sink::{ResultSink, SinkError};
use serde_json::json;
use std::sync::Arc;
use survey_domain::core::string::truncate;
use survey_domain::{
    DomainError, OutputRow, ParseIssue, ParseReport, Persona, PersonaType, PromptTemplate,
    ProviderModels, Survey, parse_response_with_report,
};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Max characters of an offending line shown in warnings
const LINE_PREVIEW_CHARS: usize = 80;

/// Errors that stop a persona-type run
#[derive(Error, Debug)]
pub enum RunSimulationError {
    #[error("Failed to compose prompt for persona {persona_id}: {source}")]
    Compose {
        persona_id: String,
        #[source]
        source: DomainError,
    },

    #[error("Output error: {0}")]
    Output(#[from] SinkError),

    #[error("No models configured")]
    EmptyModels,
}

/// Input for the [`RunSimulationUseCase`].
#[derive(Debug, Clone)]
pub struct RunSimulationInput {
    pub persona_type: PersonaType,
    pub personas: Vec<Persona>,
    pub template: PromptTemplate,
    pub survey: Survey,
    /// Survey block substituted into every prompt
    pub survey_formatted: String,
    /// Provider → models, in call order
    pub models: Vec<ProviderModels>,
}

impl RunSimulationInput {
    pub fn new(
        persona_type: PersonaType,
        personas: Vec<Persona>,
        template: PromptTemplate,
        survey: Survey,
        models: Vec<ProviderModels>,
    ) -> Self {
        let survey_formatted = survey_domain::format_survey(survey.questions());
        Self {
            persona_type,
            personas,
            template,
            survey,
            survey_formatted,
            models,
        }
    }

    /// Number of provider calls this run will make
    pub fn total_calls(&self) -> usize {
        let models: usize = self.models.iter().map(|p| p.models.len()).sum();
        self.personas.len() * models
    }
}

/// Counters for one persona-type run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub persona_type: PersonaType,
    pub rows_written: usize,
    /// Rows where the provider returned nothing
    pub no_response: usize,
    /// Rows with every question answered
    pub complete_rows: usize,
    /// `MISSING` slots across all rows
    pub missing_answers: usize,
    pub unparseable_lines: usize,
    pub invalid_ids: usize,
}

impl RunSummary {
    pub fn new(persona_type: PersonaType) -> Self {
        Self {
            persona_type,
            rows_written: 0,
            no_response: 0,
            complete_rows: 0,
            missing_answers: 0,
            unparseable_lines: 0,
            invalid_ids: 0,
        }
    }

    fn record(&mut self, report: &ParseReport) {
        self.rows_written += 1;
        if report.no_response {
            self.no_response += 1;
        } else {
            self.missing_answers += report.missing;
        }
        if report.is_complete() {
            self.complete_rows += 1;
        }
        self.unparseable_lines += report.unparseable_lines();
        self.invalid_ids += report.invalid_ids();
    }
}

/// Use case for running the survey over one persona type.
///
/// 1. Write the header
/// 2. For each persona, compose the prompt once
/// 3. For each model, call the provider, parse, write one row
/// 4. Pause `request_delay` after every successful call
pub struct RunSimulationUseCase {
    client: Arc<dyn ProviderClient>,
    params: SimulationParams,
    response_logger: Arc<dyn ResponseLogger>,
}

impl RunSimulationUseCase {
    pub fn new(client: Arc<dyn ProviderClient>, params: SimulationParams) -> Self {
        Self {
            client,
            params,
            response_logger: Arc::new(NoResponseLogger),
        }
    }

    /// Create with a response logger.
    pub fn with_response_logger(mut self, logger: Arc<dyn ResponseLogger>) -> Self {
        self.response_logger = logger;
        self
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Execute the run, streaming rows into `sink`.
    pub async fn execute(
        &self,
        input: RunSimulationInput,
        sink: &mut dyn ResultSink,
        progress: &dyn SimulationProgressNotifier,
    ) -> Result<RunSummary, RunSimulationError> {
        let total_calls = input.total_calls();
        if input.models.iter().all(|p| p.models.is_empty()) {
            return Err(RunSimulationError::EmptyModels);
        }

        info!(
            "Starting {} persona run: {} personas, {} calls",
            input.persona_type,
            input.personas.len(),
            total_calls
        );

        sink.write_header(&OutputRow::header(&input.survey))?;
        progress.on_run_start(input.persona_type, total_calls);

        let generation = self.params.generation();
        let mut summary = RunSummary::new(input.persona_type);

        for persona in &input.personas {
            let prompt = input
                .template
                .compose(&persona.description, &input.survey_formatted)
                .map_err(|source| RunSimulationError::Compose {
                    persona_id: persona.id.clone(),
                    source,
                })?;

            for provider in &input.models {
                for model in &provider.models {
                    debug!("Calling {} ({}) for {}", model, provider.provider, persona.id);

                    let raw = match self.client.generate(&prompt, model, &generation).await {
                        Ok(text) => Some(text),
                        Err(e) => {
                            warn!("No response from {} for {}: {}", model, persona.id, e);
                            self.response_logger.log(ResponseEvent::new(
                                "model_error",
                                json!({
                                    "persona_id": persona.id,
                                    "persona_type": input.persona_type.as_str(),
                                    "provider": provider.provider,
                                    "model": model,
                                    "error": e.to_string(),
                                }),
                            ));
                            None
                        }
                    };

                    let report =
                        parse_response_with_report(raw.as_deref(), input.survey.expected_ids());
                    log_issues(&persona.id, model, &report.issues);

                    if let Some(text) = &raw {
                        self.response_logger.log(ResponseEvent::new(
                            "model_response",
                            json!({
                                "persona_id": persona.id,
                                "persona_type": input.persona_type.as_str(),
                                "provider": provider.provider,
                                "model": model,
                                "prompt_chars": prompt.chars().count(),
                                "response": text,
                                "missing": report.missing,
                                "unparseable_lines": report.unparseable_lines(),
                                "invalid_ids": report.invalid_ids(),
                            }),
                        ));
                    }

                    let outcome = if raw.is_none() {
                        CallOutcome::Failed
                    } else if report.is_complete() {
                        CallOutcome::Complete
                    } else {
                        CallOutcome::Partial
                    };
                    summary.record(&report);

                    let row = OutputRow {
                        persona_id: persona.id.clone(),
                        persona_type: input.persona_type,
                        model: model.clone(),
                        answers: report.answers,
                    };
                    sink.write_row(&row)?;
                    progress.on_call_complete(&persona.id, model, outcome);

                    if raw.is_some() && !self.params.request_delay.is_zero() {
                        tokio::time::sleep(self.params.request_delay).await;
                    }
                }
            }
        }

        info!(
            "Finished {} persona run: {} rows, {} without response",
            input.persona_type, summary.rows_written, summary.no_response
        );
        progress.on_run_complete(&summary);

        Ok(summary)
    }
}

fn log_issues(persona_id: &str, model: &str, issues: &[ParseIssue]) {
    for issue in issues {
        match issue {
            ParseIssue::UnparseableLine { line, fault } => warn!(
                "Unparseable line from {} for {} ({}): {}",
                model,
                persona_id,
                fault.describe(),
                truncate(line, LINE_PREVIEW_CHARS)
            ),
            ParseIssue::InvalidQuestionId { id, line } => warn!(
                "Unknown question id {} from {} for {}: {}",
                id,
                model,
                persona_id,
                truncate(line, LINE_PREVIEW_CHARS)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::progress::NoProgress;
    use crate::ports::provider_client::{GatewayError, GenerationParams};
    use crate::ports::result_sink::MemorySink;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;
    use survey_domain::Question;

    // ==================== Mocks ====================

    struct MockClient {
        responses: Mutex<VecDeque<Result<String, GatewayError>>>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl MockClient {
        fn new(responses: Vec<Result<String, GatewayError>>) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from(responses)),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProviderClient for MockClient {
        async fn generate(
            &self,
            prompt: &str,
            model: &str,
            _params: &GenerationParams,
        ) -> Result<String, GatewayError> {
            self.calls
                .lock()
                .unwrap()
                .push((prompt.to_string(), model.to_string()));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::Other("No more responses".to_string())))
        }
    }

    struct FailingSink {
        rows_before_failure: usize,
        written: usize,
    }

    impl ResultSink for FailingSink {
        fn write_header(&mut self, _columns: &[String]) -> Result<(), SinkError> {
            Ok(())
        }

        fn write_row(&mut self, _row: &OutputRow) -> Result<(), SinkError> {
            if self.written == self.rows_before_failure {
                return Err(SinkError::Write("disk full".to_string()));
            }
            self.written += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl ResponseLogger for RecordingLogger {
        fn log(&self, event: ResponseEvent) {
            self.events.lock().unwrap().push(event.event_type);
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl SimulationProgressNotifier for RecordingProgress {
        fn on_run_start(&self, persona_type: PersonaType, total_calls: usize) {
            self.events
                .lock()
                .unwrap()
                .push(format!("start:{}:{}", persona_type, total_calls));
        }

        fn on_call_complete(&self, persona_id: &str, model: &str, outcome: CallOutcome) {
            self.events
                .lock()
                .unwrap()
                .push(format!("call:{}:{}:{:?}", persona_id, model, outcome));
        }

        fn on_run_complete(&self, summary: &RunSummary) {
            self.events
                .lock()
                .unwrap()
                .push(format!("done:{}", summary.rows_written));
        }
    }

    // ==================== Helpers ====================

    fn survey() -> Survey {
        Survey::new(vec![
            Question::new(1, "您的性别", vec!["A. 男".into(), "B. 女".into()]),
            Question::new(2, "您的年龄", vec![]),
        ])
        .unwrap()
    }

    fn personas(n: usize) -> Vec<Persona> {
        (0..n)
            .map(|i| Persona::new(format!("gen_{}", i + 1), format!("persona {}", i + 1)))
            .collect()
    }

    fn input(personas: Vec<Persona>, models: Vec<ProviderModels>) -> RunSimulationInput {
        RunSimulationInput::new(
            PersonaType::General,
            personas,
            PromptTemplate::new("{persona_description}\n---\n{survey_questions_formatted}"),
            survey(),
            models,
        )
    }

    fn no_delay() -> SimulationParams {
        SimulationParams::default().with_request_delay(Duration::ZERO)
    }

    fn answers(row: &OutputRow) -> Vec<&str> {
        row.answers.iter().collect()
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_rows_in_persona_major_order() {
        let client = Arc::new(MockClient::new(vec![
            Ok("1：A\n2：B".to_string()),
            Ok("1：C\n2：D".to_string()),
            Ok("1：E\n2：F".to_string()),
            Ok("1：G\n2：H".to_string()),
            Ok("1：I\n2：J".to_string()),
            Ok("1：K\n2：L".to_string()),
        ]));
        let use_case = RunSimulationUseCase::new(client.clone(), no_delay());
        let models = vec![
            ProviderModels::new("openai", vec!["gpt-4o".into(), "gpt-3.5-turbo".into()]),
            ProviderModels::new("zhipuai", vec!["glm-4".into()]),
        ];
        let mut sink = MemorySink::default();

        let summary = use_case
            .execute(input(personas(2), models), &mut sink, &NoProgress)
            .await
            .unwrap();

        assert_eq!(summary.rows_written, 6);
        assert_eq!(summary.complete_rows, 6);
        assert_eq!(
            sink.header.unwrap(),
            ["persona_id", "persona_type", "model", "q1", "q2"]
        );

        let keys: Vec<(&str, &str)> = sink
            .rows
            .iter()
            .map(|r| (r.persona_id.as_str(), r.model.as_str()))
            .collect();
        assert_eq!(
            keys,
            [
                ("gen_1", "gpt-4o"),
                ("gen_1", "gpt-3.5-turbo"),
                ("gen_1", "glm-4"),
                ("gen_2", "gpt-4o"),
                ("gen_2", "gpt-3.5-turbo"),
                ("gen_2", "glm-4"),
            ]
        );
        assert_eq!(answers(&sink.rows[4]), ["I", "J"]);

        let calls = client.calls();
        assert_eq!(calls.len(), 6);
        assert!(calls[0].0.starts_with("persona 1\n---\n1. 您的性别\n   A. 男 B. 女"));
        assert!(calls[3].0.starts_with("persona 2\n---\n"));
    }

    #[tokio::test]
    async fn test_provider_failure_becomes_no_response_row() {
        let client = Arc::new(MockClient::new(vec![
            Err(GatewayError::RateLimited("429".to_string())),
            Ok("题号1：A\n2:B".to_string()),
        ]));
        let use_case = RunSimulationUseCase::new(client, no_delay());
        let models = vec![ProviderModels::new(
            "openai",
            vec!["gpt-4o".into(), "gpt-4".into()],
        )];
        let mut sink = MemorySink::default();

        let summary = use_case
            .execute(input(personas(1), models), &mut sink, &NoProgress)
            .await
            .unwrap();

        assert_eq!(answers(&sink.rows[0]), ["NO_RESPONSE", "NO_RESPONSE"]);
        assert_eq!(answers(&sink.rows[1]), ["A", "B"]);
        assert_eq!(summary.no_response, 1);
        assert_eq!(summary.complete_rows, 1);
        assert_eq!(summary.missing_answers, 0);
    }

    #[tokio::test]
    async fn test_parse_issues_are_counted() {
        let client = Arc::new(MockClient::new(vec![Ok(
            "好的，以下是我的回答\n1：A\n99：Z\nabc：x".to_string(),
        )]));
        let use_case = RunSimulationUseCase::new(client, no_delay());
        let models = vec![ProviderModels::new("openai", vec!["gpt-4o".into()])];
        let mut sink = MemorySink::default();

        let summary = use_case
            .execute(input(personas(1), models), &mut sink, &NoProgress)
            .await
            .unwrap();

        assert_eq!(answers(&sink.rows[0]), ["A", "MISSING"]);
        assert_eq!(summary.missing_answers, 1);
        assert_eq!(summary.invalid_ids, 1);
        assert_eq!(summary.unparseable_lines, 2);
        assert_eq!(summary.complete_rows, 0);
    }

    #[tokio::test]
    async fn test_compose_failure_stops_run() {
        let client = Arc::new(MockClient::new(vec![]));
        let use_case = RunSimulationUseCase::new(client.clone(), no_delay());
        let mut run = input(
            personas(2),
            vec![ProviderModels::new("openai", vec!["gpt-4o".into()])],
        );
        run.template = PromptTemplate::new("{persona_description} {age}");
        let mut sink = MemorySink::default();

        let err = use_case
            .execute(run, &mut sink, &NoProgress)
            .await
            .unwrap_err();

        match err {
            RunSimulationError::Compose { persona_id, source } => {
                assert_eq!(persona_id, "gen_1");
                assert_eq!(source, DomainError::UnknownPlaceholder("age".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(sink.rows.is_empty());
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_sink_failure_stops_run() {
        let client = Arc::new(MockClient::new(vec![
            Ok("1：A\n2：B".to_string()),
            Ok("1：A\n2：B".to_string()),
            Ok("1：A\n2：B".to_string()),
        ]));
        let use_case = RunSimulationUseCase::new(client.clone(), no_delay());
        let models = vec![ProviderModels::new("openai", vec!["gpt-4o".into()])];
        let mut sink = FailingSink {
            rows_before_failure: 1,
            written: 0,
        };

        let err = use_case
            .execute(input(personas(3), models), &mut sink, &NoProgress)
            .await
            .unwrap_err();

        assert!(matches!(err, RunSimulationError::Output(_)));
        assert_eq!(sink.written, 1);
        assert_eq!(client.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_models_rejected() {
        let client = Arc::new(MockClient::new(vec![]));
        let use_case = RunSimulationUseCase::new(client, no_delay());
        let models = vec![ProviderModels::new("openai", vec![])];
        let mut sink = MemorySink::default();

        let err = use_case
            .execute(input(personas(1), models), &mut sink, &NoProgress)
            .await
            .unwrap_err();

        assert!(matches!(err, RunSimulationError::EmptyModels));
        assert!(sink.header.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_only_after_successful_calls() {
        let client = Arc::new(MockClient::new(vec![
            Ok("1：A".to_string()),
            Err(GatewayError::Timeout),
            Ok(String::new()),
        ]));
        let params = SimulationParams::default().with_request_delay(Duration::from_secs(2));
        let use_case = RunSimulationUseCase::new(client, params);
        let models = vec![ProviderModels::new("openai", vec!["gpt-4o".into()])];
        let mut sink = MemorySink::default();

        let started = tokio::time::Instant::now();
        use_case
            .execute(input(personas(3), models), &mut sink, &NoProgress)
            .await
            .unwrap();

        // Two successful calls (including the empty reply), one failure
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(4));
        assert!(elapsed < Duration::from_secs(5));
        assert_eq!(answers(&sink.rows[2]), ["NO_RESPONSE", "NO_RESPONSE"]);
    }

    #[tokio::test]
    async fn test_progress_and_logger_events() {
        let client = Arc::new(MockClient::new(vec![
            Ok("1：A\n2：B".to_string()),
            Ok("1：A".to_string()),
            Err(GatewayError::AuthenticationFailed("401".to_string())),
        ]));
        let logger = Arc::new(RecordingLogger::default());
        let use_case =
            RunSimulationUseCase::new(client, no_delay()).with_response_logger(logger.clone());
        let models = vec![ProviderModels::new(
            "openai",
            vec!["a".into(), "b".into(), "c".into()],
        )];
        let progress = RecordingProgress::default();
        let mut sink = MemorySink::default();

        use_case
            .execute(input(personas(1), models), &mut sink, &progress)
            .await
            .unwrap();

        assert_eq!(
            *progress.events.lock().unwrap(),
            [
                "start:general:3",
                "call:gen_1:a:Complete",
                "call:gen_1:b:Partial",
                "call:gen_1:c:Failed",
                "done:3",
            ]
        );
        assert_eq!(
            *logger.events.lock().unwrap(),
            ["model_response", "model_response", "model_error"]
        );
    }
}
