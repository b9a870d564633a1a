//! Core types and foundational components
//!
//! This module contains the step log data model, error handling,
//! and constants used throughout the application.

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items for convenience
pub use error::{Result, XRayError};
pub use types::{Candidate, CandidateEvaluation, Metrics, ReferenceProduct, StepRecord};
