//! Run command - dispatch a single precompile call

use crate::config::Config;
use crate::CommonArgs;
use anyhow::{Context, Result};
use clap::Args;
use console::style;
use ec_precompiles::{Address, CallContext, PrecompileSet};
use serde::Serialize;
use std::fs;

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Precompile address, e.g. 0x80
    #[arg(short, long)]
    address: Address,

    /// Input as hex, or @path to read raw bytes from a file
    #[arg(short, long)]
    input: String,

    /// Gas supplied to the call (defaults to the operation's cost)
    #[arg(short, long)]
    gas: Option<u64>,
}

#[derive(Serialize)]
struct Report {
    address: String,
    success: bool,
    output: String,
    remaining_gas: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Decode `--input`: `@path` reads the file, anything else is hex.
fn read_input(arg: &str) -> Result<Vec<u8>> {
    if let Some(path) = arg.strip_prefix('@') {
        return fs::read(path).with_context(|| format!("Failed to read input file: {:?}", path));
    }
    let digits = arg.trim().strip_prefix("0x").unwrap_or(arg.trim());
    hex::decode(digits).context("Input is not valid hex")
}

pub fn run(config: &Config, args: RunArgs) -> Result<()> {
    let input = read_input(&args.input)?;
    let set = PrecompileSet::bw6_761(&config.gas);

    let handler = set
        .get(&args.address)
        .with_context(|| format!("No precompile registered at {}", args.address))?;
    let gas = args.gas.unwrap_or_else(|| handler.required_gas(&input));

    if !config.quiet && !config.json_output {
        println!(
            "{} Calling {} at {}...",
            style("→").cyan().bold(),
            handler.operation(),
            args.address
        );
        println!("  Input: {} bytes", input.len());
        println!("  Gas: {}", gas);
        println!();
    }

    let result = set
        .call(&CallContext::default(), &args.address, &input, gas)
        .with_context(|| format!("No precompile registered at {}", args.address))?;

    let report = match &result {
        Ok(out) => Report {
            address: args.address.to_string(),
            success: true,
            output: hex::encode(&out.output),
            remaining_gas: out.remaining_gas,
            error: None,
        },
        Err(failure) => Report {
            address: args.address.to_string(),
            success: false,
            output: String::new(),
            remaining_gas: failure.remaining_gas,
            error: Some(failure.error.to_string()),
        },
    };

    if config.json_output {
        println!("{}", serde_json::to_string(&report)?);
    } else if config.quiet {
        if report.success {
            println!("0x{}", report.output);
        }
    } else if report.success {
        println!("{} Call succeeded", style("✓").green().bold());
        println!();
        println!("  Output: 0x{}", report.output);
        println!("  Remaining gas: {}", report.remaining_gas);
    } else {
        println!("{} Call failed", style("✗").red().bold());
        println!();
        println!("  Remaining gas: {}", report.remaining_gas);
    }

    match result {
        Ok(_) => Ok(()),
        Err(failure) => Err(failure.error.into()),
    }
}
