use clap::{Parser, Subcommand};
use clap_complete::Shell;
use chrono::Local;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Forecast roadmap and project completion from throughput data
    Forecast {
        /// Throughput YAML file
        #[arg(short = 'f', long)]
        throughput: String,
        /// Roadmap YAML file
        #[arg(short, long)]
        roadmap: String,
        /// Output YAML file
        #[arg(short, long)]
        output: String,
        /// Number of Monte Carlo trials
        #[arg(short = 'n', long, default_value_t = 10000)]
        simulations: usize,
        /// Number of simulated days after which a trial gives up
        #[arg(short, long, default_value_t = 1000)]
        maximum_iterations: u32,
        /// Forecast start date (YYYY-MM-DD)
        #[arg(short, long, default_value_t = default_start_date())]
        start_date: String,
        /// Optional CSV file receiving every trial's estimates
        #[arg(long)]
        csv: Option<String>,
        /// Seed for reproducible forecasts
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn default_start_date() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Default filter directive for a `-v` count when `RUST_LOG` is unset.
pub fn log_level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
