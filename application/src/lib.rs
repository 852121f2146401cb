//! Application layer for persona-survey
//!
//! This crate contains the simulation use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{RetryPolicy, SimulationParams};
pub use ports::{
    progress::{CallOutcome, NoProgress, SimulationProgressNotifier},
    provider_client::{GatewayError, GenerationParams, ProviderClient},
    response_logger::{NoResponseLogger, ResponseEvent, ResponseLogger},
    result_sink::{MemorySink, ResultSink, SinkError},
};
pub use use_cases::run_simulation::{
    RunSimulationError, RunSimulationInput, RunSimulationUseCase, RunSummary,
};
