//! Property-based tests for xray using proptest
//!
//! These tests generate random candidate pools to check the filter and
//! ranking rules, and drive the binary with arbitrary seeds and counts.

use assert_cmd::prelude::*;
use proptest::prelude::*;
use std::process::Command;

use xray::core::ReferenceProduct;
use xray::pipeline::mock::{generate_candidates, round_to};
use xray::pipeline::{FilterThresholds, Pipeline, rng_from_seed};
use xray::trace::{XRay, load_steps};
use xray::{Candidate, StepRecord};

const NAME: &str = "xray";
const REFERENCE_PRICE: f64 = 29.99;

/// Candidates spread across both sides of every default threshold
fn candidate_strategy() -> impl Strategy<Value = Candidate> {
    (
        1usize..100,
        0.0f64..100.0,
        2.5f64..5.0,
        0u32..500,
        prop::option::of(0.3f64..1.0),
    )
        .prop_map(|(i, price, rating, reviews, relevance)| {
            let mut candidate = Candidate::new(
                format!("B0PROP{i:02}"),
                format!("Property Product {i}"),
                round_to(price, 2),
                round_to(rating, 1),
                reviews,
            );
            candidate.relevance = relevance.map(|r| round_to(r, 2));
            candidate
        })
}

fn pool_strategy() -> impl Strategy<Value = Vec<Candidate>> {
    prop::collection::vec(candidate_strategy(), 0..40)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_qualified_iff_every_threshold_passes(candidate in candidate_strategy()) {
        let filters = FilterThresholds::default();
        let eval = filters.evaluate(&candidate, REFERENCE_PRICE);
        let (low, high) = filters.price_range(REFERENCE_PRICE);
        let relevance = candidate.relevance.unwrap_or(0.0);

        let price_ok = low <= candidate.price && candidate.price <= high;
        let rating_ok = candidate.rating >= filters.min_rating;
        let reviews_ok = candidate.reviews >= filters.min_reviews;
        let relevance_ok = relevance >= filters.min_relevance;

        prop_assert_eq!(eval.qualified, price_ok && rating_ok && reviews_ok && relevance_ok);
        prop_assert_eq!(eval.qualified, eval.fail_reasons.is_empty());

        let expected_count = [price_ok, rating_ok, reviews_ok, relevance_ok]
            .iter()
            .filter(|ok| !**ok)
            .count();
        prop_assert_eq!(eval.fail_reasons.len(), expected_count);

        // Reasons keep the order price, rating, reviews, relevance
        let mut reasons = eval.fail_reasons.iter();
        if !price_ok {
            prop_assert_eq!(reasons.next().map(String::as_str), Some("price out of range"));
        }
        if !rating_ok {
            prop_assert_eq!(reasons.next().map(String::as_str), Some("rating too low"));
        }
        if !reviews_ok {
            prop_assert_eq!(reasons.next().map(String::as_str), Some("reviews too low"));
        }
        if !relevance_ok {
            let reason = reasons.next().cloned().unwrap_or_default();
            prop_assert!(reason.starts_with("relevance "));
            prop_assert!(reason.ends_with(" < 0.7"));
        }
    }

    #[test]
    fn test_selection_has_most_reviews_among_qualified(pool in pool_strategy()) {
        let pipeline = Pipeline::default();
        let ranked = pipeline.filter_and_rank(&pool);

        prop_assert_eq!(ranked.evaluations.len(), pool.len());
        prop_assert_eq!(ranked.passed + ranked.failed, pool.len());

        let qualified: Vec<&Candidate> = pool
            .iter()
            .zip(&ranked.evaluations)
            .filter(|(_, e)| e.qualified)
            .map(|(c, _)| c)
            .collect();
        prop_assert_eq!(qualified.len(), ranked.passed);

        match ranked.selection {
            None => prop_assert!(qualified.is_empty()),
            Some(selected) => {
                let max_reviews = qualified.iter().map(|c| c.reviews).max();
                prop_assert_eq!(Some(selected.reviews), max_reviews);
                // Earliest candidate wins a tie
                let first = qualified.iter().find(|c| Some(c.reviews) == max_reviews);
                prop_assert_eq!(first.map(|c| c.asin.as_str()), Some(selected.asin.as_str()));
            }
        }
    }

    #[test]
    fn test_generated_candidates_stay_in_range(seed in any::<u64>(), count in 0usize..60) {
        let mut rng = rng_from_seed(Some(seed));
        let candidates = generate_candidates(&mut rng, count);

        prop_assert_eq!(candidates.len(), count);
        for c in &candidates {
            prop_assert!((8.0..=90.0).contains(&c.price));
            prop_assert!((3.0..=5.0).contains(&c.rating));
            prop_assert!((10..=10_000).contains(&c.reviews));
            prop_assert!(c.relevance.is_none());
            prop_assert_eq!(&c.searchable_text, &format!("{} {}", c.asin, c.title));
        }
    }

    #[test]
    fn test_pipeline_log_reloads_with_same_steps(seed in any::<u64>(), count in 1usize..40) {
        let dir = tempfile::tempdir().unwrap();
        let log_file = dir.path().join("xray_log.json");
        let mut xray = XRay::new(&log_file);
        let mut rng = rng_from_seed(Some(seed));

        let pipeline = Pipeline::new(ReferenceProduct::default(), FilterThresholds::default(), count);
        let outcome = pipeline.run(&mut xray, &mut rng, None).unwrap();
        let recorded = xray.finish();
        let loaded: Vec<StepRecord> = load_steps(&log_file).unwrap();

        prop_assert_eq!(loaded.len(), 4);
        prop_assert_eq!(&loaded, &recorded);

        let last = &loaded[3];
        prop_assert_eq!(last.evaluations().len(), count);
        prop_assert_eq!(
            last.selection_asin(),
            outcome.selection.as_ref().map(|c| c.asin.as_str())
        );
        for (eval, candidate) in last.evaluations().iter().zip(&outcome.candidates) {
            prop_assert_eq!(&eval.asin, &candidate.asin);
            prop_assert!((eval.metrics.price - candidate.price).abs() < 1e-9);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn test_binary_runs_for_any_seed(seed in any::<u64>(), count in 1usize..50) {
        let dir = tempfile::tempdir().unwrap();

        let mut cmd = Command::cargo_bin(NAME).unwrap();
        cmd.current_dir(dir.path())
            .args(["--no-config", "--quiet", "run"])
            .arg("--seed")
            .arg(seed.to_string())
            .arg("--candidates")
            .arg(count.to_string());
        cmd.assert().success();

        let steps = load_steps(dir.path().join("xray_log.json")).unwrap();
        prop_assert_eq!(steps.len(), 4);
        prop_assert_eq!(steps[3].evaluations().len(), count);
    }
}
