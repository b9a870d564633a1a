// Command-line interface definitions and parsing for xray

use crate::config::CliConfig;
use crate::reporting::CandidateFilter;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "xray", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    // Files
    /// Step log to write or read (default: xray_log.json)
    #[arg(long, value_name = "PATH", global = true, help_heading = "Files")]
    pub log_file: Option<String>,

    // Output & Verbosity
    /// Suppress progress and summary output
    #[arg(short = 'q', long, global = true, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Disable progress bars
    #[arg(long, global = true, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", global = true, help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, global = true, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the mock sourcing pipeline and record every step
    Run {
        /// Number of mock candidates to fetch (default: 30)
        #[arg(long, value_name = "COUNT")]
        candidates: Option<usize>,

        /// Seed for reproducible mock data
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,
    },
    /// Render a recorded step log to the terminal and to HTML
    Dashboard {
        /// Where to write the HTML dashboard (default: xray_dashboard.html)
        #[arg(short = 'o', long, value_name = "PATH")]
        output: Option<String>,

        /// Which candidates to list in the terminal tables
        #[arg(long, value_enum, default_value_t = CandidateFilter::All)]
        filter: CandidateFilter,

        /// Only print to the terminal
        #[arg(long)]
        no_html: bool,
    },
    /// Generate shell completions
    #[command(arg_required_else_help = true)]
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Convert the derive-based CLI into a CliConfig
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    let mut cli_config = CliConfig {
        log_file: cli.log_file.clone(),
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_progress: cli.no_progress,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
        ..Default::default()
    };

    match &cli.command {
        Commands::Run { candidates, seed } => {
            cli_config.candidate_count = *candidates;
            cli_config.seed = *seed;
        }
        Commands::Dashboard { output, .. } => {
            cli_config.dashboard_path = output.clone();
        }
        Commands::Completions { .. } => {}
    }

    cli_config
}
