//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::constants::{files, mock, thresholds};
use crate::core::error::{Result, XRayError};
use crate::reporting::logging;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where the step log is written and read
    pub log_file: Option<String>,

    /// Where the HTML dashboard is written
    pub dashboard_path: Option<String>,

    /// Number of mock candidates fetched by the search stage
    pub candidate_count: Option<usize>,

    /// Seed for reproducible mock data
    pub seed: Option<u64>,

    /// Lower price bound as a multiple of the reference price
    pub price_band_low: Option<f64>,

    /// Upper price bound as a multiple of the reference price
    pub price_band_high: Option<f64>,

    /// Minimum star rating for a candidate to qualify
    pub min_rating: Option<f64>,

    /// Minimum review count for a candidate to qualify
    pub min_reviews: Option<u32>,

    /// Minimum relevance score for a candidate to qualify
    pub min_relevance: Option<f64>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: Some(files::DEFAULT_LOG_FILE.to_string()),
            dashboard_path: Some(files::DEFAULT_DASHBOARD_FILE.to_string()),
            candidate_count: Some(mock::CANDIDATE_COUNT),
            seed: None, // Fresh entropy on every run
            price_band_low: Some(thresholds::PRICE_BAND_LOW),
            price_band_high: Some(thresholds::PRICE_BAND_HIGH),
            min_rating: Some(thresholds::MIN_RATING),
            min_reviews: Some(thresholds::MIN_REVIEWS),
            min_relevance: Some(thresholds::MIN_RELEVANCE),
            verbose: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults for missing keys
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            XRayError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let parsed: Config = toml::from_str(&content).map_err(|e| {
            XRayError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::default().overlay(parsed);
        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        Self::search_from(Path::new("."))
    }

    /// Look for `.xray.toml` in `dir` and up to three of its parents
    pub fn search_from(dir: &Path) -> Self {
        let mut candidates: Vec<PathBuf> = vec![dir.join(files::CONFIG_FILE)];
        for i in 1..=files::CONFIG_SEARCH_DEPTH {
            candidates.push(dir.join("../".repeat(i)).join(files::CONFIG_FILE));
        }

        for path in candidates.iter().filter(|path| path.is_file()) {
            match Self::load_from_file(path) {
                Ok(config) => return config,
                Err(e) => logging::log_warning(&format!("Ignoring config file: {e}")),
            }
        }

        // Fall back to defaults
        Self::default()
    }

    /// Replace values in `self` with every value `other` sets
    fn overlay(mut self, other: Config) -> Self {
        if other.log_file.is_some() {
            self.log_file = other.log_file;
        }
        if other.dashboard_path.is_some() {
            self.dashboard_path = other.dashboard_path;
        }
        if other.candidate_count.is_some() {
            self.candidate_count = other.candidate_count;
        }
        if other.seed.is_some() {
            self.seed = other.seed;
        }
        if other.price_band_low.is_some() {
            self.price_band_low = other.price_band_low;
        }
        if other.price_band_high.is_some() {
            self.price_band_high = other.price_band_high;
        }
        if other.min_rating.is_some() {
            self.min_rating = other.min_rating;
        }
        if other.min_reviews.is_some() {
            self.min_reviews = other.min_reviews;
        }
        if other.min_relevance.is_some() {
            self.min_relevance = other.min_relevance;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        self
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Files
        if let Some(ref log_file) = cli_config.log_file {
            self.log_file = Some(log_file.clone());
        }
        if let Some(ref dashboard_path) = cli_config.dashboard_path {
            self.dashboard_path = Some(dashboard_path.clone());
        }

        // Mock data
        if let Some(count) = cli_config.candidate_count {
            self.candidate_count = Some(count);
        }
        if let Some(seed) = cli_config.seed {
            self.seed = Some(seed);
        }

        // Output
        if cli_config.verbose {
            self.verbose = Some(true);
        }
    }

    pub fn log_file_path(&self) -> PathBuf {
        PathBuf::from(
            self.log_file
                .as_deref()
                .unwrap_or(files::DEFAULT_LOG_FILE),
        )
    }

    pub fn dashboard_file_path(&self) -> PathBuf {
        PathBuf::from(
            self.dashboard_path
                .as_deref()
                .unwrap_or(files::DEFAULT_DASHBOARD_FILE),
        )
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(count) = self.candidate_count {
            if count == 0 {
                return Err(XRayError::Config(
                    "Candidate count cannot be 0. Expected a positive integer.".to_string(),
                ));
            }
            if count > mock::MAX_CANDIDATE_COUNT {
                return Err(XRayError::Config(format!(
                    "Candidate count of {count} is too large. Expected at most {}.",
                    mock::MAX_CANDIDATE_COUNT
                )));
            }
        }

        let low = self.price_band_low.unwrap_or(thresholds::PRICE_BAND_LOW);
        let high = self.price_band_high.unwrap_or(thresholds::PRICE_BAND_HIGH);
        if !low.is_finite() || !high.is_finite() {
            return Err(XRayError::Config(format!(
                "Price band [{low}, {high}] must be finite numbers."
            )));
        }
        if low < 0.0 || high < 0.0 {
            return Err(XRayError::Config(format!(
                "Price band [{low}, {high}] cannot be negative."
            )));
        }
        if low > high {
            return Err(XRayError::Config(format!(
                "Price band lower bound {low} is above upper bound {high}."
            )));
        }

        if let Some(rating) = self.min_rating
            && !(0.0..=5.0).contains(&rating)
        {
            return Err(XRayError::Config(format!(
                "Minimum rating {rating} is invalid. Expected a value between 0-5."
            )));
        }

        if let Some(relevance) = self.min_relevance
            && !(0.0..=1.0).contains(&relevance)
        {
            return Err(XRayError::Config(format!(
                "Minimum relevance {relevance} is invalid. Expected a value between 0-1."
            )));
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Files
    pub log_file: Option<String>,       // --log-file
    pub dashboard_path: Option<String>, // dashboard --output

    // Mock data
    pub candidate_count: Option<usize>, // run --candidates
    pub seed: Option<u64>,              // run --seed

    // Output
    pub quiet: bool,       // --quiet
    pub verbose: bool,     // --verbose
    pub no_progress: bool, // --no-progress

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
