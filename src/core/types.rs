//! Records that flow through the pipeline and into the step log.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The product we are sourcing competitors for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceProduct {
    pub title: String,
    pub category: String,
    pub price: f64,
    pub rating: f64,
    pub reviews: u32,
}

impl Default for ReferenceProduct {
    fn default() -> Self {
        Self {
            title: "Stainless Steel Water Bottle 32oz Insulated".to_string(),
            category: "Sports & Outdoors".to_string(),
            price: 29.99,
            rating: 4.2,
            reviews: 1247,
        }
    }
}

/// A candidate product returned by the (mock) search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub asin: String,
    pub title: String,
    pub price: f64,
    pub rating: f64,
    pub reviews: u32,
    pub searchable_text: String,
    /// Filled in by the relevance stage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance: Option<f64>,
}

impl Candidate {
    pub fn new(asin: String, title: String, price: f64, rating: f64, reviews: u32) -> Self {
        let searchable_text = format!("{asin} {title}");
        Self {
            asin,
            title,
            price,
            rating,
            reviews,
            searchable_text,
            relevance: None,
        }
    }
}

/// Metrics the filters look at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub price: f64,
    pub rating: f64,
    pub reviews: u32,
    pub relevance: f64,
}

/// Outcome of running the filters over one candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateEvaluation {
    pub asin: String,
    pub title: String,
    pub searchable_text: String,
    pub metrics: Metrics,
    pub qualified: bool,
    pub fail_reasons: Vec<String>,
}

/// One logged stage of the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: String,
    pub timestamp: String,
    #[serde(default)]
    pub input: Value,
    #[serde(default)]
    pub output: Value,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluations: Option<Vec<CandidateEvaluation>>,
}

impl StepRecord {
    /// ASIN of `output.selection`, if the step selected a candidate
    pub fn selection_asin(&self) -> Option<&str> {
        self.output
            .get("selection")
            .and_then(|selection| selection.get("asin"))
            .and_then(Value::as_str)
    }

    pub fn evaluations(&self) -> &[CandidateEvaluation] {
        self.evaluations.as_deref().unwrap_or(&[])
    }
}
