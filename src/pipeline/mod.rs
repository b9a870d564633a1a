//! Mock product-sourcing pipeline
//!
//! Generates synthetic candidates, filters them against fixed thresholds
//! and records every stage through the step logger.

pub mod filters;
pub mod mock;
pub mod runner;

pub use filters::{FilterThresholds, select_top};
pub use runner::{Pipeline, PipelineOutcome, rng_from_seed};
