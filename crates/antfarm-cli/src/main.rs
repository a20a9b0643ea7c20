//! Antfarm CLI - run and tune the foraging simulation headless.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "antfarm")]
#[command(author, version, about = "Antfarm - ants, food, and pheromone trails", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (per-tick debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default antfarm.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Run the colony simulation
    Run {
        /// Number of ticks to run (default: one simulated minute)
        #[arg(short, long, default_value = "3600")]
        ticks: u64,

        /// RNG seed, overriding the config
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print final statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search for parameters that collect the most food
    Gym {
        /// Candidates to evaluate
        #[arg(short, long, default_value = "20")]
        iterations: u32,

        /// Colonies run per candidate
        #[arg(short = 'n', long, default_value = "4")]
        samples: usize,

        /// Ticks per colony
        #[arg(short, long, default_value = "3600")]
        ticks: u64,

        /// RNG seed for reproducible searches
        #[arg(short, long)]
        seed: Option<u64>,

        /// Write every trial to this CSV file
        #[arg(long)]
        csv: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Run { ticks, seed, json } => commands::run::run(ticks, seed, json),
        Commands::Gym {
            iterations,
            samples,
            ticks,
            seed,
            csv,
        } => commands::gym::run(iterations, samples, ticks, seed, csv.as_deref()),
    }
}
