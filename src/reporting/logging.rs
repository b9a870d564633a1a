use crate::config::Config;
use crate::core::types::Candidate;
use log::{debug, error, info, warn};
use std::path::Path;

/// Level implied by the verbosity flags
pub fn level_for(verbose: bool, quiet: bool) -> log::LevelFilter {
    if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    }
}

/// Initialize the logger with appropriate level based on verbosity.
///
/// The logger itself accepts debug records; the active level is gated by
/// [`set_verbosity`] so a config file can still raise it later.
pub fn init_logger(verbose: bool, quiet: bool) {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .try_init();

    set_verbosity(verbose, quiet);
}

/// Change the active log level after the logger is installed
pub fn set_verbosity(verbose: bool, quiet: bool) {
    let level = level_for(verbose, quiet);
    log::set_max_level(level);
    debug!("Logger level set to: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    let seed = config
        .seed
        .map_or_else(|| "entropy".to_string(), |s| s.to_string());

    info!(
        "Configuration: log_file={}, candidates={}, seed={seed}",
        config.log_file_path().display(),
        config.candidate_count.unwrap_or_default()
    );
    info!(
        "Thresholds: price_band=[{}, {}], min_rating={}, min_reviews={}, min_relevance={}",
        config.price_band_low.unwrap_or_default(),
        config.price_band_high.unwrap_or_default(),
        config.min_rating.unwrap_or_default(),
        config.min_reviews.unwrap_or_default(),
        config.min_relevance.unwrap_or_default()
    );
}

/// Log a step append and the flush that followed it
pub fn log_step_recorded(step: &str, total_steps: usize, log_file: &Path) {
    debug!(
        "Recorded step '{step}' ({total_steps} total), flushed to {}",
        log_file.display()
    );
}

/// Log the outcome of the filter stage
pub fn log_filter_outcome(passed: usize, failed: usize, selection: Option<&Candidate>) {
    match selection {
        Some(candidate) => info!(
            "✅ {passed} passed, {failed} failed; selected {} ({} reviews)",
            candidate.asin, candidate.reviews
        ),
        None => warn!("❌ {passed} passed, {failed} failed; no candidate qualified"),
    }
}

/// Log the location of a freshly written dashboard
pub fn log_dashboard_written(path: &Path, steps: usize) {
    info!("Dashboard for {steps} step(s) written to {}", path.display());
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}
