//! Decision-trace logging for a mock product-sourcing pipeline.
//!
//! The [`trace::XRay`] logger records every pipeline stage to a JSON file;
//! [`reporting`] turns that file back into terminal and HTML dashboards.

pub mod config;
pub mod core;
pub mod pipeline;
pub mod reporting;
pub mod trace;
pub mod ui;

pub use crate::config::Config;
pub use crate::core::{Candidate, CandidateEvaluation, Metrics, Result, StepRecord, XRayError};
pub use crate::pipeline::{Pipeline, PipelineOutcome};
pub use crate::trace::{XRay, load_steps};
