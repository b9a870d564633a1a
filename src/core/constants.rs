/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes the file names, filter thresholds and mock data
/// ranges used by the pipeline and the dashboard.
/// File name constants
pub mod files {
    /// Default location of the persisted step log
    pub const DEFAULT_LOG_FILE: &str = "xray_log.json";
    /// Default location of the generated HTML dashboard
    pub const DEFAULT_DASHBOARD_FILE: &str = "xray_dashboard.html";
    /// Config file looked up in the current and parent directories
    pub const CONFIG_FILE: &str = ".xray.toml";
    /// How many parent directories are searched for the config file
    pub const CONFIG_SEARCH_DEPTH: usize = 3;
}

/// Default filter thresholds for candidate qualification
pub mod thresholds {
    /// Lower bound of the price band as a multiple of the reference price
    pub const PRICE_BAND_LOW: f64 = 0.5;
    /// Upper bound of the price band as a multiple of the reference price
    pub const PRICE_BAND_HIGH: f64 = 2.0;
    /// Minimum star rating
    pub const MIN_RATING: f64 = 3.8;
    /// Minimum number of reviews
    pub const MIN_REVIEWS: u32 = 100;
    /// Minimum relevance score
    pub const MIN_RELEVANCE: f64 = 0.7;
}

/// Ranges used when generating mock candidates
pub mod mock {
    /// Number of candidates fetched by the mock search
    pub const CANDIDATE_COUNT: usize = 30;
    /// Upper bound accepted for a configured candidate count
    pub const MAX_CANDIDATE_COUNT: usize = 10_000;
    /// Result limit reported in the search step input
    pub const SEARCH_LIMIT: usize = 50;

    pub const PRICE_MIN: f64 = 8.0;
    pub const PRICE_MAX: f64 = 90.0;
    pub const RATING_MIN: f64 = 3.0;
    pub const RATING_MAX: f64 = 5.0;
    pub const REVIEWS_MIN: u32 = 10;
    pub const REVIEWS_MAX: u32 = 10_000;
    pub const RELEVANCE_MIN: f64 = 0.5;
    pub const RELEVANCE_MAX: f64 = 1.0;

    /// ASIN prefix for generated candidates
    pub const ASIN_PREFIX: &str = "B0COMP";
    /// Model name reported by the keyword generation step
    pub const KEYWORD_MODEL: &str = "mock-llm";
}

/// Names of the recorded pipeline steps
pub mod step_names {
    pub const KEYWORD_GENERATION: &str = "📝 keyword_generation";
    pub const CANDIDATE_SEARCH: &str = "🔍 candidate_search";
    pub const RELEVANCE_EVALUATION: &str = "🤖 relevance_evaluation";
    pub const APPLY_FILTERS_AND_RANK: &str = "🏆 apply_filters_and_rank";

    /// All steps in the order the pipeline records them
    pub const ALL: [&str; 4] = [
        KEYWORD_GENERATION,
        CANDIDATE_SEARCH,
        RELEVANCE_EVALUATION,
        APPLY_FILTERS_AND_RANK,
    ];
}

/// Failure reasons attached to candidate evaluations
pub mod fail_reasons {
    pub const PRICE_OUT_OF_RANGE: &str = "price out of range";
    pub const RATING_TOO_LOW: &str = "rating too low";
    pub const REVIEWS_TOO_LOW: &str = "reviews too low";
}

/// Timestamp format written into every step record
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Placeholder shown when no candidate was selected
pub const NO_SELECTION: &str = "N/A";
