//! Conversion pipeline.
//!
//! Orchestrates the complete registry conversion: table reading, record
//! building, registry assembly, fixture projection, JSON output and the
//! console summary.

use crate::config::RegistryConfig;
use crate::error::{IbanRegistryError, Result};
use crate::fixtures::Fixtures;
use crate::record::build_records;
use crate::registry::Registry;
use crate::report::RegistrySummary;
use crate::table::RegistryTable;

use colored::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Processing statistics
#[derive(Debug, Default, Clone)]
pub struct ProcessingStats {
    pub records_parsed: usize,
    pub records_skipped: usize,
    pub registry_codes: usize,
    pub territory_codes: usize,
    pub territory_claims_dropped: usize,
    pub valid_ibans: usize,
    pub sepa_countries: usize,
    pub registry_path: PathBuf,
    pub fixtures_path: PathBuf,
    pub processing_time_ms: u128,
}

/// Everything produced by a conversion run, before anything is written
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    pub registry: Registry,
    pub fixtures: Fixtures,
}

/// Main processor for IBAN registry conversion
pub struct RegistryProcessor {
    config: RegistryConfig,
}

impl RegistryProcessor {
    /// Create a new processor, validating the configuration
    pub fn new(config: RegistryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Build registry and fixtures from an already parsed table
    pub fn convert(&self, table: &RegistryTable) -> ConversionOutput {
        let records = build_records(table);
        let registry = Registry::assemble(&records);
        let fixtures = Fixtures::from_registry(&registry, &self.config.fixture_metadata);

        ConversionOutput { registry, fixtures }
    }

    /// Main processing entry point
    pub fn process(&self) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        let show_report = self.config.show_report;

        if show_report {
            println!("{}", "Parsing IBAN Registry".bright_green().bold());
            println!(
                "  {} {}",
                "Input:".bright_cyan(),
                self.config.input_path.display()
            );
        }

        let table = RegistryTable::from_path(&self.config.input_path)?;
        info!(
            "Read registry table with {} country columns from {} ({} unknown rows, {} skipped lines)",
            table.country_count(),
            self.config.input_path.display(),
            table.ignored_labels(),
            table.skipped_lines()
        );

        let ConversionOutput { registry, fixtures } = self.convert(&table);

        if show_report {
            println!(
                "  {} {} records",
                "Parsed".bright_green(),
                registry.records_processed().to_string().bright_white().bold()
            );
            println!(
                "  {} {} country codes",
                "Processed".bright_green(),
                registry.len().to_string().bright_white().bold()
            );
            println!(
                "  {} fixtures for {} countries",
                "Generated".bright_green(),
                fixtures.valid_ibans.len().to_string().bright_white().bold()
            );
        }

        let registry_path = self.config.registry_output_path();
        let fixtures_path = self.config.fixtures_output_path();

        // No atomicity across the pair: a failure on the second write leaves
        // the first one in place
        write_json(&registry_path, &registry)?;
        write_json(&fixtures_path, &fixtures)?;

        if show_report {
            println!(
                "  {} {}",
                "Saved:".bright_cyan(),
                registry_path.display()
            );
            println!(
                "  {} {}",
                "Saved:".bright_cyan(),
                fixtures_path.display()
            );
            RegistrySummary::from_fixtures(&fixtures, self.config.sample_count).print();
        }

        let stats = ProcessingStats {
            records_parsed: registry.records_processed(),
            records_skipped: registry.records_skipped(),
            registry_codes: registry.len(),
            territory_codes: registry.territory_count(),
            territory_claims_dropped: registry.territory_claims_dropped(),
            valid_ibans: fixtures.valid_ibans.len(),
            sepa_countries: fixtures.metadata.sepa_countries,
            registry_path,
            fixtures_path,
            processing_time_ms: start_time.elapsed().as_millis(),
        };

        info!(
            "Conversion complete in {}ms: {} codes ({} territories), {} valid IBAN fixtures, {} SEPA",
            stats.processing_time_ms,
            stats.registry_codes,
            stats.territory_codes,
            stats.valid_ibans,
            stats.sepa_countries
        );
        if stats.records_skipped > 0 || stats.territory_claims_dropped > 0 {
            info!(
                "{} records without a country code, {} territory claims already taken",
                stats.records_skipped, stats.territory_claims_dropped
            );
        }

        Ok(stats)
    }
}

/// Write a value as pretty-printed JSON, creating the parent directory
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| IbanRegistryError::OutputWrite {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(path, json).map_err(|source| IbanRegistryError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const REGISTRY: &str = "Name of country\tAndorra\tFrance\n\
        IBAN prefix country code (ISO 3166)\tAD\tFR\n\
        Country code includes other countries/territories\tN/A\tGF, GP\n\
        SEPA country\tYes\tYes\n\
        IBAN length\t24\t27\n\
        IBAN electronic format example\tAD1200012030200359100100\tFR1420041010050500013M02606\n";

    #[test]
    fn test_convert() {
        let processor = RegistryProcessor::new(RegistryConfig::default()).unwrap();
        let table = RegistryTable::parse(REGISTRY).unwrap();

        let output = processor.convert(&table);
        assert_eq!(output.registry.len(), 4);
        assert_eq!(output.fixtures.valid_ibans.len(), 4);
        assert_eq!(output.fixtures.metadata.sepa_countries, 4);
    }

    #[test]
    fn test_process_writes_outputs() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("registry.txt");
        std::fs::write(&input, REGISTRY).unwrap();

        let config = RegistryConfig::default()
            .with_input_path(&input)
            .with_output_dir(temp_dir.path().join("out"))
            .without_report();
        let stats = RegistryProcessor::new(config).unwrap().process().unwrap();

        assert_eq!(stats.records_parsed, 2);
        assert_eq!(stats.registry_codes, 4);
        assert_eq!(stats.territory_codes, 2);
        assert_eq!(stats.records_skipped, 0);
        assert_eq!(stats.territory_claims_dropped, 0);
        assert_eq!(stats.valid_ibans, 4);
        assert_eq!(stats.sepa_countries, 4);
        assert!(stats.registry_path.exists());
        assert!(stats.fixtures_path.exists());
    }

    #[test]
    fn test_process_counts_skips_and_dropped_claims() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("registry.txt");
        std::fs::write(
            &input,
            "IBAN prefix country code (ISO 3166)\tGB\tN/A\tFR\n\
             Country code includes other countries/territories\tJE\t\tJE, FR\n\
             SEPA country\tYes\tNo\tNo\n",
        )
        .unwrap();

        let config = RegistryConfig::default()
            .with_input_path(&input)
            .with_output_dir(temp_dir.path())
            .without_report();
        let stats = RegistryProcessor::new(config).unwrap().process().unwrap();

        assert_eq!(stats.records_parsed, 3);
        assert_eq!(stats.records_skipped, 1);
        assert_eq!(stats.registry_codes, 3);
        assert_eq!(stats.territory_codes, 1);
        // FR listing itself doesn't count, JE was already taken by GB
        assert_eq!(stats.territory_claims_dropped, 1);
        assert_eq!(stats.valid_ibans, 0);
        assert_eq!(stats.sepa_countries, 2);
    }

    #[test]
    fn test_process_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let config = RegistryConfig::default()
            .with_input_path(temp_dir.path().join("missing.txt"))
            .with_output_dir(temp_dir.path())
            .without_report();

        let result = RegistryProcessor::new(config).unwrap().process();
        assert!(matches!(
            result,
            Err(IbanRegistryError::FileNotFound { .. })
        ));
        assert!(!temp_dir.path().join("iban_registry_full.json").exists());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = RegistryConfig::default().with_sample_count(0);
        assert!(RegistryProcessor::new(config).is_err());
    }
}
