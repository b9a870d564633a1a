use clap::{CommandFactory, Parser};
use xray::config::{CliConfig, Config};
use xray::pipeline::{Pipeline, rng_from_seed};
use xray::reporting::logging;
use xray::reporting::{CandidateFilter, DashboardData, HtmlDashboard};
use xray::trace::{XRay, load_steps};
use xray::ui::output;
use xray::ui::{Cli, Commands, ProgressReporter, cli_to_config, print_completions};

fn main() {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut app = Cli::command();
        print_completions(shell, &mut app);
        std::process::exit(0);
    }

    match run_xray_logic(&cli) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Dispatch the parsed command, returning the process exit code
pub fn run_xray_logic(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli);
    logging::init_logger(cli_config.verbose, cli_config.quiet);

    let config = load_and_merge_config(&cli_config).inspect_err(|e| {
        logging::log_error("Could not load configuration", Some(&**e));
    })?;

    // A config file may enable verbose logging on its own
    let verbose = config.verbose.unwrap_or(false);
    if verbose && !cli_config.verbose {
        logging::set_verbosity(verbose, cli_config.quiet);
    }
    logging::log_config_info(&config);

    match &cli.command {
        Commands::Run { .. } => run_pipeline(&config, &cli_config)?,
        Commands::Dashboard {
            filter, no_html, ..
        } => run_dashboard(&config, &cli_config, *filter, *no_html)?,
        Commands::Completions { .. } => {}
    }

    Ok(0)
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file)?
    } else {
        Config::load_from_standard_locations()
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

fn run_pipeline(config: &Config, cli_config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut xray = XRay::new(config.log_file_path());
    let mut rng = rng_from_seed(config.seed);
    let mut progress = ProgressReporter::new(!cli_config.quiet && !cli_config.no_progress);

    let outcome = Pipeline::from_config(config).run(&mut xray, &mut rng, Some(&mut progress))?;
    if !cli_config.quiet {
        output::display_run_summary(&outcome, xray.log_file());
    }

    let steps = xray.finish();
    log::debug!("Run finished with {} recorded step(s)", steps.len());
    Ok(())
}

fn run_dashboard(
    config: &Config,
    cli_config: &CliConfig,
    filter: CandidateFilter,
    no_html: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let log_file = config.log_file_path();
    let steps = load_steps(&log_file).inspect_err(|e| {
        logging::log_error(
            &format!("Could not read step log '{}'", log_file.display()),
            Some(e),
        );
    })?;

    if steps.iter().all(|step| step.evaluations().is_empty()) {
        logging::log_warning(&format!(
            "'{}' has no candidate evaluations, summary metrics are skipped",
            log_file.display()
        ));
    }

    if !cli_config.quiet {
        output::display_dashboard(&steps, filter);
    }

    if !no_html {
        let dashboard_path = config.dashboard_file_path();
        let step_count = steps.len();
        let data = DashboardData::new(
            steps,
            &log_file,
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        );
        HtmlDashboard::generate_dashboard(&data, &dashboard_path)?;
        logging::log_dashboard_written(&dashboard_path, step_count);

        if !cli_config.quiet {
            println!("📊 HTML dashboard generated: {}", dashboard_path.display());
        }
    }

    Ok(())
}
