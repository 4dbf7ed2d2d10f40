//! List command - show registered precompiles

use crate::config::Config;
use crate::CommonArgs;
use anyhow::Result;
use clap::Args;
use console::style;
use ec_precompiles::{Operation, PrecompileSet};
use serde::Serialize;

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Serialize)]
struct Entry {
    address: String,
    operation: Operation,
    name: &'static str,
    gas: u64,
    input_size: Option<usize>,
}

pub fn run(config: &Config, _args: ListArgs) -> Result<()> {
    let set = PrecompileSet::bw6_761(&config.gas);

    let entries: Vec<Entry> = set
        .iter()
        .map(|(address, handler)| {
            let op = handler.operation();
            Entry {
                address: address.to_string(),
                operation: op,
                name: op.name(),
                gas: handler.required_gas(&[]),
                input_size: op.input_size(),
            }
        })
        .collect();

    if config.json_output {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if !config.quiet {
        match &config.source {
            Some(path) => println!(
                "{} Gas schedule from {}",
                style("→").cyan().bold(),
                path.display()
            ),
            None => println!("{} Default gas schedule", style("→").cyan().bold()),
        }
        println!();
    }

    for entry in &entries {
        let input = entry
            .input_size
            .map(|size| format!("{size} bytes"))
            .unwrap_or_else(|| "variable".to_string());
        println!(
            "  {}  {:<28} {:>9} gas  {}",
            style(&entry.address).dim(),
            entry.name,
            entry.gas,
            style(input).dim()
        );
    }

    Ok(())
}
