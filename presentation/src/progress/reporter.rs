//! Progress reporting for simulation runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use survey_application::{CallOutcome, RunSummary, SimulationProgressNotifier};
use survey_domain::PersonaType;

/// Reports progress with one progress bar per persona-type run
pub struct ProgressReporter {
    run_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            run_bar: Mutex::new(None),
        }
    }

    fn run_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn run_display_name(persona_type: PersonaType) -> String {
        format!("{} personas", persona_type)
    }

    fn outcome_mark(outcome: CallOutcome) -> colored::ColoredString {
        match outcome {
            CallOutcome::Complete => "v".green(),
            CallOutcome::Partial => "~".yellow(),
            CallOutcome::Failed => "x".red(),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationProgressNotifier for ProgressReporter {
    fn on_run_start(&self, persona_type: PersonaType, total_calls: usize) {
        let pb = ProgressBar::new(total_calls as u64);
        pb.set_style(Self::run_style());
        pb.set_prefix(Self::run_display_name(persona_type));
        pb.set_message("Starting...");

        if let Ok(mut bar) = self.run_bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_call_complete(&self, persona_id: &str, model: &str, outcome: CallOutcome) {
        if let Ok(bar) = self.run_bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.set_message(format!(
                "{} {} / {}",
                Self::outcome_mark(outcome),
                persona_id,
                model
            ));
            pb.inc(1);
        }
    }

    fn on_run_complete(&self, summary: &RunSummary) {
        if let Ok(mut bar) = self.run_bar.lock()
            && let Some(pb) = bar.take()
        {
            pb.finish_with_message(format!(
                "{} ({} rows)",
                "done".green(),
                summary.rows_written
            ));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl SimulationProgressNotifier for SimpleProgress {
    fn on_run_start(&self, persona_type: PersonaType, total_calls: usize) {
        println!(
            "{} {} ({} calls)",
            "->".cyan(),
            ProgressReporter::run_display_name(persona_type).bold(),
            total_calls
        );
    }

    fn on_call_complete(&self, persona_id: &str, model: &str, outcome: CallOutcome) {
        let mark = ProgressReporter::outcome_mark(outcome);
        match outcome {
            CallOutcome::Failed => println!("  {} {} / {} (no response)", mark, persona_id, model),
            _ => println!("  {} {} / {}", mark, persona_id, model),
        }
    }

    fn on_run_complete(&self, _summary: &RunSummary) {
        println!();
    }
}
