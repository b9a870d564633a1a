//! Terminal rendering of pipeline runs and recorded step logs

use crate::core::types::StepRecord;
use crate::pipeline::PipelineOutcome;
use crate::reporting::summary::{CandidateFilter, CandidateRow, DashboardSummary, RowStatus, candidate_rows};
use crate::ui::color::{Colors, bold, colorize};

use std::fmt::Write;
use std::path::Path;

/// Width of the longest bar in the pass/fail chart
const BAR_WIDTH: usize = 40;

/// Lines printed after a pipeline run
pub fn render_run_summary(outcome: &PipelineOutcome, log_file: &Path) -> String {
    let selection = match &outcome.selection {
        Some(candidate) => format!(
            "{} {} ({} reviews)",
            candidate.asin, candidate.title, candidate.reviews
        ),
        None => crate::core::constants::NO_SELECTION.to_string(),
    };

    format!(
        "{}: {}\n{}: {}\n{}: {}\nPipeline executed. Logs saved to {}\n",
        bold("Passed filters", Colors::BRIGHT_CYAN),
        colorize(&outcome.passed.to_string(), Colors::BRIGHT_GREEN),
        bold("Failed filters", Colors::BRIGHT_CYAN),
        colorize(&outcome.failed.to_string(), Colors::BRIGHT_RED),
        bold("Top candidate", Colors::BRIGHT_CYAN),
        colorize(&selection, Colors::BRIGHT_YELLOW),
        log_file.display()
    )
}

pub fn display_run_summary(outcome: &PipelineOutcome, log_file: &Path) {
    print!("{}", render_run_summary(outcome, log_file));
}

/// Summary metrics plus a text bar chart of passed vs failed
pub fn render_summary(summary: &DashboardSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", bold("📊 Summary Metrics", Colors::BRIGHT_WHITE));
    let _ = writeln!(out, "  Total Candidates: {}", summary.total_candidates);
    let _ = writeln!(out, "  Passed Filters:   {}", summary.passed);
    let _ = writeln!(out, "  Top Candidate:    {}", summary.top_candidate_label());
    let _ = writeln!(out);

    let max = summary.passed.max(summary.failed()).max(1);
    for (label, count, color) in [
        ("Passed", summary.passed, Colors::GREEN),
        ("Failed", summary.failed(), Colors::RED),
    ] {
        let width = count * BAR_WIDTH / max;
        let _ = writeln!(
            out,
            "  {label:<6} {} {count}",
            colorize(&"█".repeat(width), color)
        );
    }
    out
}

/// One step: header, input, output, reasoning and its candidate table
pub fn render_step(step: &StepRecord, filter: CandidateFilter) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        bold(&step.step, Colors::BRIGHT_CYAN),
        colorize(&format!("({})", step.timestamp), Colors::DIM)
    );
    let _ = writeln!(out, "  Input:  {}", step.input);
    let _ = writeln!(out, "  Output: {}", step.output);
    let _ = writeln!(out, "  Reasoning: {}", step.reasoning);

    if !step.evaluations().is_empty() {
        let rows = candidate_rows(step, filter);
        let _ = writeln!(
            out,
            "  Candidate Evaluations (showing {}: {} of {})",
            filter.label(),
            rows.len(),
            step.evaluations().len()
        );
        let _ = writeln!(
            out,
            "    {:<24} {:>8} {:>6} {:>8} {:>9} {:^9} {:^4} Fail Reasons",
            "Title", "Price", "Rating", "Reviews", "Relevance", "Qualified", "Top"
        );
        for row in &rows {
            let _ = writeln!(out, "    {}", render_row(row));
        }
    }
    out
}

fn render_row(row: &CandidateRow) -> String {
    let line = format!(
        "{:<24} {:>8.2} {:>6.1} {:>8} {:>9.2} {:^9} {:^4} {}",
        truncate(&row.title, 24),
        row.price,
        row.rating,
        row.reviews,
        row.relevance,
        row.qualified_mark(),
        row.top_mark(),
        row.fail_reasons.join("; ")
    );
    let color = match row.status {
        RowStatus::Selected => Colors::BRIGHT_YELLOW,
        RowStatus::Passed => Colors::GREEN,
        RowStatus::Failed => Colors::RED,
    };
    colorize(&line, color)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

/// Whole terminal dashboard for a step log
pub fn render_dashboard(steps: &[StepRecord], filter: CandidateFilter) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", bold("🚀 X-Ray Decision Dashboard", Colors::BRIGHT_WHITE));
    let _ = writeln!(out);

    if let Some(summary) = DashboardSummary::from_steps(steps) {
        out.push_str(&render_summary(&summary));
        let _ = writeln!(out);
    }

    for step in steps {
        out.push_str(&render_step(step, filter));
        let _ = writeln!(out);
    }
    out
}

pub fn display_dashboard(steps: &[StepRecord], filter: CandidateFilter) {
    print!("{}", render_dashboard(steps, filter));
}
