//! Step logging
//!
//! The `XRay` logger records each pipeline stage and persists the full
//! step list to a JSON file after every append.

pub mod logger;

pub use logger::{XRay, load_steps, save_steps};
