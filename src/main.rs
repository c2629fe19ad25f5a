use anyhow::Context;
use clap::Parser;
use colored::*;
use iban_registry::cli::{self, Args};
use iban_registry::processor::RegistryProcessor;
use std::process;

fn main() {
    let args = Args::parse();
    cli::setup_logging(&args);

    match run(&args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = args.to_config();
    let input_path = config.input_path.clone();

    let processor = RegistryProcessor::new(config).context("Invalid configuration")?;
    let stats = processor
        .process()
        .with_context(|| format!("Failed to convert registry {}", input_path.display()))?;

    if processor.config().show_report {
        println!(
            "\n{} {} codes ({} territories, {} SEPA) and {} fixtures in {}ms",
            "Processing complete:".bright_green().bold(),
            stats.registry_codes,
            stats.territory_codes,
            stats.sepa_countries,
            stats.valid_ibans,
            stats.processing_time_ms
        );
        if stats.records_skipped > 0 {
            println!(
                "  {} {} records without a country code",
                "Skipped".bright_yellow(),
                stats.records_skipped
            );
        }
        if stats.territory_claims_dropped > 0 {
            println!(
                "  {} {} territory claims already registered by another country",
                "Ignored".bright_yellow(),
                stats.territory_claims_dropped
            );
        }
    }

    Ok(())
}
