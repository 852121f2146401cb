//! Progress notification port
//!
//! Defines the interface for reporting progress during a simulation run.

use crate::use_cases::run_simulation::RunSummary;
use survey_domain::PersonaType;

/// How a single provider call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    /// Reply received and every question answered
    Complete,
    /// Reply received but some slots are `MISSING`
    Partial,
    /// Provider error; the row is all `NO_RESPONSE`
    Failed,
}

/// Callback for progress updates during a simulation run
///
/// Implementations live in the presentation layer.
pub trait SimulationProgressNotifier: Send + Sync {
    /// Called once before the first call, with the number of planned calls
    fn on_run_start(&self, persona_type: PersonaType, total_calls: usize);

    /// Called after each (persona, model) call has been recorded
    fn on_call_complete(&self, persona_id: &str, model: &str, outcome: CallOutcome);

    /// Called once after the last row has been written
    fn on_run_complete(&self, summary: &RunSummary);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl SimulationProgressNotifier for NoProgress {
    fn on_run_start(&self, _persona_type: PersonaType, _total_calls: usize) {}
    fn on_call_complete(&self, _persona_id: &str, _model: &str, _outcome: CallOutcome) {}
    fn on_run_complete(&self, _summary: &RunSummary) {}
}
