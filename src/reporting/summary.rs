//! Aggregates and table rows shared by the HTML and terminal dashboards.

use crate::core::constants::NO_SELECTION;
use crate::core::types::{CandidateEvaluation, StepRecord};

use clap::ValueEnum;

/// Counts over every evaluation in the log
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total_candidates: usize,
    pub passed: usize,
    /// Titles of evaluations whose ASIN matches the final selection
    pub top_candidates: Vec<String>,
}

impl DashboardSummary {
    /// Build the summary, or `None` when no step carries evaluations
    pub fn from_steps(steps: &[StepRecord]) -> Option<Self> {
        let all: Vec<&CandidateEvaluation> =
            steps.iter().flat_map(|step| step.evaluations()).collect();
        if all.is_empty() {
            return None;
        }

        let passed = all.iter().filter(|e| e.qualified).count();
        let top_candidates = match steps.last().and_then(StepRecord::selection_asin) {
            Some(asin) => all
                .iter()
                .filter(|e| e.asin == asin)
                .map(|e| e.title.clone())
                .collect(),
            None => Vec::new(),
        };

        Some(Self {
            total_candidates: all.len(),
            passed,
            top_candidates,
        })
    }

    pub fn failed(&self) -> usize {
        self.total_candidates - self.passed
    }

    /// Comma separated top candidate titles, "N/A" when there are none
    pub fn top_candidate_label(&self) -> String {
        if self.top_candidates.is_empty() {
            NO_SELECTION.to_string()
        } else {
            self.top_candidates.join(", ")
        }
    }
}

/// Which candidate rows to show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum CandidateFilter {
    #[default]
    All,
    Passed,
    Failed,
}

impl CandidateFilter {
    pub fn matches(self, evaluation: &CandidateEvaluation) -> bool {
        match self {
            CandidateFilter::All => true,
            CandidateFilter::Passed => evaluation.qualified,
            CandidateFilter::Failed => !evaluation.qualified,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CandidateFilter::All => "All",
            CandidateFilter::Passed => "Passed",
            CandidateFilter::Failed => "Failed",
        }
    }
}

/// Highlight of a candidate row; selected beats qualified beats failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    Selected,
    Passed,
    Failed,
}

impl RowStatus {
    pub fn css_class(self) -> &'static str {
        match self {
            RowStatus::Selected => "row-selected",
            RowStatus::Passed => "row-passed",
            RowStatus::Failed => "row-failed",
        }
    }
}

/// One rendered row of a step's candidate table
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRow {
    pub asin: String,
    pub title: String,
    pub price: f64,
    pub rating: f64,
    pub reviews: u32,
    pub relevance: f64,
    pub qualified: bool,
    pub top_candidate: bool,
    pub fail_reasons: Vec<String>,
    pub status: RowStatus,
}

impl CandidateRow {
    pub fn qualified_mark(&self) -> &'static str {
        if self.qualified { "✅" } else { "❌" }
    }

    pub fn top_mark(&self) -> &'static str {
        if self.top_candidate { "⭐" } else { "" }
    }
}

/// Rows for `step`'s evaluations that pass `filter`, in logged order
pub fn candidate_rows(step: &StepRecord, filter: CandidateFilter) -> Vec<CandidateRow> {
    let selection = step.selection_asin();

    step.evaluations()
        .iter()
        .filter(|e| filter.matches(e))
        .map(|e| {
            let top_candidate = selection == Some(e.asin.as_str());
            let status = if top_candidate {
                RowStatus::Selected
            } else if e.qualified {
                RowStatus::Passed
            } else {
                RowStatus::Failed
            };

            CandidateRow {
                asin: e.asin.clone(),
                title: e.title.clone(),
                price: e.metrics.price,
                rating: e.metrics.rating,
                reviews: e.metrics.reviews,
                relevance: e.metrics.relevance,
                qualified: e.qualified,
                top_candidate,
                fail_reasons: e.fail_reasons.clone(),
                status,
            }
        })
        .collect()
}
