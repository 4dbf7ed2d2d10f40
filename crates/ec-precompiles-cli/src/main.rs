//! ecprecompile CLI - Drive the BW6-761 precompiles from the command line
//!
//! Lists the registered contracts, dispatches raw calls with a gas budget and
//! builds demo PlonK bundles for the verify precompile.

mod commands;
mod config;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use commands::{list, prove_demo, run};
use console::style;
use std::path::PathBuf;

/// CLI for the BW6-761 EC precompiles
#[derive(Parser)]
#[command(name = "ecprecompile")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Common options shared across commands
#[derive(Args, Clone)]
pub struct CommonArgs {
    /// Path to a config file with a [gas] table
    #[arg(short, long, env = "EC_PRECOMPILES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (human, json)
    #[arg(long, default_value = "human")]
    pub output: OutputFormat,

    /// Quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered precompiles with their gas cost
    List(list::ListArgs),

    /// Call a precompile with raw input bytes
    Run(run::RunArgs),

    /// Build a PlonK proof bundle for a demo circuit
    ProveDemo(prove_demo::ProveDemoArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List(args) => {
            config::Config::load(&args.common).and_then(|config| list::run(&config, args))
        }
        Commands::Run(args) => {
            config::Config::load(&args.common).and_then(|config| run::run(&config, args))
        }
        Commands::ProveDemo(args) => config::Config::load(&args.common)
            .and_then(|config| prove_demo::run(&config, args)),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
