//! Prove-demo command - build a PlonK bundle for the verify precompile
//!
//! The SRS is sampled from `--seed`, so the resulting bundle is only good for
//! testing.

use crate::config::Config;
use crate::CommonArgs;
use anyhow::{Context, Result};
use ark_bw6_761::Fr;
use ark_std::rand::{rngs::StdRng, SeedableRng};
use clap::Args;
use console::style;
use ec_precompiles::plonk::{circuits, prove, setup, ProofBundle, Srs};
use ec_precompiles::{CallContext, PrecompileSet, PLONK_VERIFY_ADDRESS};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Args)]
pub struct ProveDemoArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Secret witness x
    #[arg(long, default_value_t = 3)]
    x: u64,

    /// Circuit to prove
    #[arg(long, default_value = "square")]
    circuit: DemoCircuit,

    /// Seed for the insecure SRS
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Write the bundle here instead of printing it as hex
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DemoCircuit {
    /// x · x == y
    Square,
    /// x³ + x + 5 == y
    Cubic,
}

/// Powers of tau sampled for the demo circuits
const DEMO_SRS_POWERS: usize = 32;

/// Build and self-check a bundle for `circuit` at `x`.
fn build_bundle(circuit: DemoCircuit, x: u64, seed: u64, config: &Config) -> Result<Vec<u8>> {
    let (cs, assignment) = match circuit {
        DemoCircuit::Square => circuits::square(Fr::from(x)),
        DemoCircuit::Cubic => circuits::cubic(Fr::from(x)),
    };

    let mut rng = StdRng::seed_from_u64(seed);
    let srs = Srs::insecure_random(DEMO_SRS_POWERS, &mut rng);
    let (pk, vk) = setup(&cs, &srs).context("Circuit setup failed")?;
    let (proof, witness) = prove(&pk, &assignment).context("Proving failed")?;
    let bytes = ProofBundle::new(proof, vk, witness).to_bytes();

    // Run the bundle through the precompile before handing it out
    let set = PrecompileSet::bw6_761(&config.gas);
    set.call(
        &CallContext::default(),
        &PLONK_VERIFY_ADDRESS,
        &bytes,
        config.gas.plonk_verify,
    )
    .context("PlonK precompile is not registered")?
    .map_err(|failure| failure.error)
    .context("Generated bundle does not verify")?;

    Ok(bytes)
}

pub fn run(config: &Config, args: ProveDemoArgs) -> Result<()> {
    if !config.quiet && !config.json_output {
        println!(
            "{} Proving {} circuit with x = {}...",
            style("→").cyan().bold(),
            match args.circuit {
                DemoCircuit::Square => "square",
                DemoCircuit::Cubic => "cubic",
            },
            args.x
        );
    }

    let spinner = if !config.quiet && !config.json_output {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .context("Invalid progress template")?,
        );
        pb.set_message("Running setup and prover...");
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let result = build_bundle(args.circuit, args.x, args.seed, config);

    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }
    let bytes = result?;

    if let Some(path) = &args.out {
        fs::write(path, &bytes)
            .with_context(|| format!("Failed to write bundle to {:?}", path))?;
    }

    if config.json_output {
        let mut report = serde_json::json!({
            "address": PLONK_VERIFY_ADDRESS.to_string(),
            "size": bytes.len(),
            "gas": config.gas.plonk_verify,
        });
        match &args.out {
            Some(path) => report["out"] = path.display().to_string().into(),
            None => report["bundle"] = hex::encode(&bytes).into(),
        }
        println!("{}", report);
    } else if config.quiet {
        if args.out.is_none() {
            println!("0x{}", hex::encode(&bytes));
        }
    } else {
        println!("{} Bundle verified by {}", style("✓").green().bold(), PLONK_VERIFY_ADDRESS);
        println!();
        println!("  Size: {} bytes", bytes.len());
        match &args.out {
            Some(path) => println!("  Written to: {}", path.display()),
            None => println!("  Bundle: 0x{}", hex::encode(&bytes)),
        }
    }

    Ok(())
}
