//! Analysis and reporting
//!
//! This module computes dashboard aggregates, renders the HTML dashboard,
//! and provides structured logging for the application.

pub mod dashboard;
pub mod logging;
pub mod summary;

// Re-export commonly used items
pub use dashboard::{DashboardData, DashboardError, HtmlDashboard};
pub use summary::{CandidateFilter, DashboardSummary};
