//! Headless command-line runner for the Biotope life simulation.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use biotope_core::TimeUnit;

#[derive(Parser)]
#[command(
    name = "biotope",
    about = "Biotope: a deterministic agent-based life simulation",
    version,
    propagate_version = true
)]
struct Cli {
    /// Increase log output on stderr (-v info, -vv debug, -vvv trace).
    /// `RUST_LOG` takes precedence when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation headless and report statistics
    Run {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "120")]
        ticks: u64,

        /// Configuration file (TOML); defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// RNG seed, overriding the configuration
        #[arg(short, long)]
        seed: Option<u64>,

        /// Time per tick: year, month or day
        #[arg(long)]
        time_unit: Option<TimeUnit>,

        /// Starting population, overriding the configuration
        #[arg(short, long)]
        agents: Option<usize>,

        /// Compute resource regrowth on the worker pool
        #[arg(long)]
        parallel: bool,

        /// Report every N ticks
        #[arg(short, long, default_value = "12")]
        every: u64,

        /// Print one JSON object per reported tick instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write a configuration file with every parameter at its default
    Init {
        /// Where to write the file
        #[arg(default_value = "biotope.toml")]
        path: PathBuf,
    },

    /// Validate a configuration file
    Check {
        /// Configuration file to check
        path: PathBuf,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            ticks,
            config,
            seed,
            time_unit,
            agents,
            parallel,
            every,
            json,
        } => commands::run::run(&commands::run::RunOptions {
            ticks,
            config,
            seed,
            time_unit,
            agents,
            parallel,
            every,
            json,
        }),
        Commands::Init { path } => commands::init::run(&path),
        Commands::Check { path } => commands::check::run(&path),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
