//! Synthetic data standing in for the LLM and the product search API.

use crate::core::constants::mock;
use crate::core::types::Candidate;

use rand::Rng;

/// Keywords the mock LLM "extracts" from the reference product
pub fn generate_keywords() -> Vec<String> {
    [
        "stainless steel water bottle insulated",
        "vacuum insulated bottle 32oz",
        "sports water bottle",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// ASIN for the `index`-th generated candidate, counting from 1
pub fn mock_asin(index: usize) -> String {
    format!("{}{index:02}", mock::ASIN_PREFIX)
}

/// Generate `count` candidates with random price, rating and review count
pub fn generate_candidates<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Candidate> {
    (1..=count)
        .map(|i| {
            Candidate::new(
                mock_asin(i),
                format!("Mock Product {i}"),
                round_to(rng.gen_range(mock::PRICE_MIN..=mock::PRICE_MAX), 2),
                round_to(rng.gen_range(mock::RATING_MIN..=mock::RATING_MAX), 1),
                rng.gen_range(mock::REVIEWS_MIN..=mock::REVIEWS_MAX),
            )
        })
        .collect()
}

/// Give every candidate a random relevance score in place
pub fn assign_relevance<R: Rng + ?Sized>(rng: &mut R, candidates: &mut [Candidate]) {
    for candidate in candidates {
        candidate.relevance = Some(round_to(
            rng.gen_range(mock::RELEVANCE_MIN..=mock::RELEVANCE_MAX),
            2,
        ));
    }
}
