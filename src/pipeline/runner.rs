use crate::config::Config;
use crate::core::constants::{mock as mock_constants, step_names};
use crate::core::error::Result;
use crate::core::types::{Candidate, CandidateEvaluation, ReferenceProduct};
use crate::pipeline::filters::{FilterThresholds, select_top};
use crate::pipeline::mock;
use crate::reporting::logging;
use crate::trace::XRay;
use crate::ui::ProgressReporter;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

/// Everything the pipeline decided, returned alongside the written log
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub keywords: Vec<String>,
    pub candidates: Vec<Candidate>,
    pub evaluations: Vec<CandidateEvaluation>,
    pub passed: usize,
    pub failed: usize,
    pub selection: Option<Candidate>,
}

/// Result of the filter stage before it is logged
#[derive(Debug, Clone)]
pub struct RankResult {
    pub evaluations: Vec<CandidateEvaluation>,
    pub passed: usize,
    pub failed: usize,
    pub selection: Option<Candidate>,
}

/// The mock sourcing pipeline: keywords, search, relevance, filter and rank
#[derive(Debug, Clone)]
pub struct Pipeline {
    reference: ReferenceProduct,
    filters: FilterThresholds,
    candidate_count: usize,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(
            ReferenceProduct::default(),
            FilterThresholds::default(),
            mock_constants::CANDIDATE_COUNT,
        )
    }
}

impl Pipeline {
    pub fn new(
        reference: ReferenceProduct,
        filters: FilterThresholds,
        candidate_count: usize,
    ) -> Self {
        Self {
            reference,
            filters,
            candidate_count,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ReferenceProduct::default(),
            FilterThresholds::from_config(config),
            config
                .candidate_count
                .unwrap_or(mock_constants::CANDIDATE_COUNT),
        )
    }

    pub fn reference(&self) -> &ReferenceProduct {
        &self.reference
    }

    /// Run every stage once, recording each one through `xray`
    pub fn run<R: Rng + ?Sized>(
        &self,
        xray: &mut XRay,
        rng: &mut R,
        mut progress: Option<&mut ProgressReporter>,
    ) -> Result<PipelineOutcome> {
        if let Some(p) = progress.as_deref_mut() {
            p.start_stages(step_names::ALL.len());
        }

        // Keyword generation (mock LLM)
        let keywords = mock::generate_keywords();
        xray.record_step(
            step_names::KEYWORD_GENERATION,
            serde_json::to_value(&self.reference)?,
            json!({"keywords": keywords, "model": mock_constants::KEYWORD_MODEL}),
            "Extracted key attributes: material, capacity, feature",
            None,
        )?;
        advance(&mut progress, step_names::KEYWORD_GENERATION);

        // Candidate search (mock API)
        let mut candidates = mock::generate_candidates(rng, self.candidate_count);
        xray.record_step(
            step_names::CANDIDATE_SEARCH,
            json!({"keyword": keywords[0], "limit": mock_constants::SEARCH_LIMIT}),
            json!({"candidates_fetched": candidates.len(), "candidates": candidates}),
            "Fetched top mock candidates with searchable fields",
            None,
        )?;
        advance(&mut progress, step_names::CANDIDATE_SEARCH);

        // Relevance evaluation (mock LLM)
        mock::assign_relevance(rng, &mut candidates);
        let asins: Vec<&str> = candidates.iter().map(|c| c.asin.as_str()).collect();
        xray.record_step(
            step_names::RELEVANCE_EVALUATION,
            json!({"candidates": asins}),
            json!({"candidates_with_relevance": candidates}),
            "Evaluated candidate relevance using mock LLM",
            None,
        )?;
        advance(&mut progress, step_names::RELEVANCE_EVALUATION);

        // Filter and rank
        let ranked = self.filter_and_rank(&candidates);
        logging::log_filter_outcome(ranked.passed, ranked.failed, ranked.selection.as_ref());
        xray.record_step(
            step_names::APPLY_FILTERS_AND_RANK,
            json!({"reference_product": self.reference}),
            json!({
                "passed": ranked.passed,
                "failed": ranked.failed,
                "selection": ranked.selection,
            }),
            "Filtered and ranked candidates by review count, rating, price, relevance",
            Some(ranked.evaluations.clone()),
        )?;
        advance(&mut progress, step_names::APPLY_FILTERS_AND_RANK);

        if let Some(p) = progress.as_deref_mut() {
            p.finish_stages(ranked.passed, candidates.len());
        }

        Ok(PipelineOutcome {
            keywords,
            candidates,
            evaluations: ranked.evaluations,
            passed: ranked.passed,
            failed: ranked.failed,
            selection: ranked.selection,
        })
    }

    /// Evaluate every candidate and pick the qualified one with most reviews
    pub fn filter_and_rank(&self, candidates: &[Candidate]) -> RankResult {
        let evaluations: Vec<CandidateEvaluation> = candidates
            .iter()
            .map(|c| self.filters.evaluate(c, self.reference.price))
            .collect();

        let qualified = candidates
            .iter()
            .zip(&evaluations)
            .filter(|(_, eval)| eval.qualified)
            .map(|(candidate, _)| candidate);
        let selection = select_top(qualified).cloned();

        let passed = evaluations.iter().filter(|e| e.qualified).count();
        RankResult {
            failed: evaluations.len() - passed,
            passed,
            evaluations,
            selection,
        }
    }
}

fn advance(progress: &mut Option<&mut ProgressReporter>, stage: &str) {
    if let Some(p) = progress.as_deref_mut() {
        p.advance_stage(stage);
    }
}

/// Seeded generator when a seed is given, entropy otherwise
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
