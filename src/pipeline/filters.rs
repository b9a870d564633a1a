//! Candidate qualification and selection.

use crate::config::Config;
use crate::core::constants::{fail_reasons, thresholds};
use crate::core::types::{Candidate, CandidateEvaluation, Metrics};

/// Thresholds a candidate has to meet to qualify
#[derive(Debug, Clone, PartialEq)]
pub struct FilterThresholds {
    /// Lower price bound as a multiple of the reference price
    pub price_band_low: f64,
    /// Upper price bound as a multiple of the reference price
    pub price_band_high: f64,
    pub min_rating: f64,
    pub min_reviews: u32,
    pub min_relevance: f64,
}

impl Default for FilterThresholds {
    fn default() -> Self {
        Self {
            price_band_low: thresholds::PRICE_BAND_LOW,
            price_band_high: thresholds::PRICE_BAND_HIGH,
            min_rating: thresholds::MIN_RATING,
            min_reviews: thresholds::MIN_REVIEWS,
            min_relevance: thresholds::MIN_RELEVANCE,
        }
    }
}

impl FilterThresholds {
    pub fn from_config(config: &Config) -> Self {
        let defaults = Self::default();
        Self {
            price_band_low: config.price_band_low.unwrap_or(defaults.price_band_low),
            price_band_high: config.price_band_high.unwrap_or(defaults.price_band_high),
            min_rating: config.min_rating.unwrap_or(defaults.min_rating),
            min_reviews: config.min_reviews.unwrap_or(defaults.min_reviews),
            min_relevance: config.min_relevance.unwrap_or(defaults.min_relevance),
        }
    }

    /// Inclusive price range derived from the reference price
    pub fn price_range(&self, reference_price: f64) -> (f64, f64) {
        (
            self.price_band_low * reference_price,
            self.price_band_high * reference_price,
        )
    }

    /// Run every predicate against `candidate`.
    ///
    /// Reasons are collected in a fixed order: price, rating, reviews,
    /// relevance. A candidate without a relevance score counts as 0.
    pub fn evaluate(&self, candidate: &Candidate, reference_price: f64) -> CandidateEvaluation {
        let (price_min, price_max) = self.price_range(reference_price);
        let relevance = candidate.relevance.unwrap_or(0.0);
        let mut reasons = Vec::new();

        if !(price_min <= candidate.price && candidate.price <= price_max) {
            reasons.push(fail_reasons::PRICE_OUT_OF_RANGE.to_string());
        }
        if candidate.rating < self.min_rating {
            reasons.push(fail_reasons::RATING_TOO_LOW.to_string());
        }
        if candidate.reviews < self.min_reviews {
            reasons.push(fail_reasons::REVIEWS_TOO_LOW.to_string());
        }
        if relevance < self.min_relevance {
            // Decimal form keeps a trailing ".0" on whole numbers
            reasons.push(format!("relevance {relevance:?} < {:?}", self.min_relevance));
        }

        CandidateEvaluation {
            asin: candidate.asin.clone(),
            title: candidate.title.clone(),
            searchable_text: format!("{} {}", candidate.asin, candidate.title),
            metrics: Metrics {
                price: candidate.price,
                rating: candidate.rating,
                reviews: candidate.reviews,
                relevance,
            },
            qualified: reasons.is_empty(),
            fail_reasons: reasons,
        }
    }
}

/// Qualified candidate with the most reviews; the earliest one wins a tie
pub fn select_top<'a, I>(qualified: I) -> Option<&'a Candidate>
where
    I: IntoIterator<Item = &'a Candidate>,
{
    qualified
        .into_iter()
        .reduce(|best, candidate| {
            if candidate.reviews > best.reviews {
                candidate
            } else {
                best
            }
        })
}
