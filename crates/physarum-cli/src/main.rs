//! Physarum CLI - run trail-following simulations from the command line.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::Overrides;

#[derive(Parser)]
#[command(name = "physarum")]
#[command(author, version, about = "Physarum - emergent trail networks from simple particles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default physarum.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite an existing physarum.toml
        #[arg(short, long)]
        force: bool,
    },

    /// Run the configured trials
    Run {
        /// Steps per trial
        #[arg(short, long)]
        steps: Option<u64>,

        /// Number of trials
        #[arg(short, long)]
        trials: Option<usize>,

        /// Number of particles
        #[arg(short, long)]
        particles: Option<usize>,

        /// Base seed (trial i uses seed + i)
        #[arg(long)]
        seed: Option<u64>,

        /// Write the JSON report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Inspect the effective configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration
    Show {
        /// Print as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },

    /// Check the configuration without running
    Validate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { path, force } => commands::init::run(path, force),
        Commands::Run {
            steps,
            trials,
            particles,
            seed,
            output,
        } => {
            let overrides = Overrides {
                steps,
                trials,
                particles,
                seed,
            };
            commands::run::run(&overrides, output, cli.verbose)
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show { json } => commands::config::show(json),
            ConfigCommands::Validate => commands::config::validate(),
        },
    }
}
