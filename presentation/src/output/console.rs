//! Console output formatter for simulation results

use colored::Colorize;
use survey_application::RunSummary;
use survey_domain::PersonaType;

/// Formats end-of-run summaries for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the summaries of all completed runs, followed by the runs that
    /// were skipped and why
    pub fn format(summaries: &[RunSummary], skipped: &[(PersonaType, String)]) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Simulation Summary"));

        if summaries.is_empty() {
            output.push_str(&format!("\n{}\n", "No persona type was simulated.".yellow()));
        }

        for summary in summaries {
            output.push_str(&Self::format_run(summary));
        }

        if !skipped.is_empty() {
            output.push_str(&format!("\n{}\n", "Skipped:".yellow().bold()));
            for (persona_type, reason) in skipped {
                output.push_str(&format!("  * {}: {}\n", persona_type, reason));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// One block per persona-type run
    pub fn format_run(summary: &RunSummary) -> String {
        let mut output = format!(
            "\n{}\n",
            format!("── {} personas ──", summary.persona_type).cyan().bold()
        );

        output.push_str(&format!(
            "  Rows written:       {}\n",
            summary.rows_written
        ));
        output.push_str(&format!(
            "  Complete rows:      {}\n",
            summary.complete_rows
        ));

        let no_response = format!("  No response:        {}\n", summary.no_response);
        if summary.no_response > 0 {
            output.push_str(&no_response.red().to_string());
        } else {
            output.push_str(&no_response);
        }

        output.push_str(&format!(
            "  Missing answers:    {}\n",
            summary.missing_answers
        ));

        if summary.unparseable_lines > 0 || summary.invalid_ids > 0 {
            output.push_str(
                &format!(
                    "  Parse issues:       {} unparseable line(s), {} invalid id(s)\n",
                    summary.unparseable_lines, summary.invalid_ids
                )
                .yellow()
                .to_string(),
            );
        }

        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("\n{}\n{}\n{}\n", line.cyan(), title.cyan().bold(), line.cyan())
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
