//! Test fixture projection of the registry
//!
//! A reduced, code-sorted view of the registry for IBAN format validation
//! tests: example IBANs per country, the length/structure/position summary
//! per code, and a small provenance block.

use crate::config::FixtureMetadataConfig;
use crate::models::Positions;
use crate::registry::Registry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Example IBAN in both renderings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidIban {
    pub electronic: String,
    pub print: String,
    pub country_name: String,
}

/// Length, structure and position summary for one code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySpec {
    pub country_name: String,
    pub iban_length: u32,
    pub bban_length: u32,
    pub iban_spec: String,
    pub bban_spec: String,
    pub sepa: bool,
    pub positions: Positions,
    pub effective_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureMetadata {
    pub total_countries: usize,
    pub sepa_countries: usize,
    pub source: String,
    pub format_version: String,
}

/// Fixture set written alongside the full registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixtures {
    pub valid_ibans: BTreeMap<String, ValidIban>,
    pub country_specs: BTreeMap<String, CountrySpec>,
    pub metadata: FixtureMetadata,
}

impl Fixtures {
    /// Project fixtures from an assembled registry
    ///
    /// Every registry code gets a country spec; only codes with an
    /// electronic example IBAN appear in `valid_ibans`.
    pub fn from_registry(registry: &Registry, metadata: &FixtureMetadataConfig) -> Self {
        let mut valid_ibans = BTreeMap::new();
        let mut country_specs = BTreeMap::new();

        for entry in registry.sorted() {
            if !entry.iban.example_electronic.is_empty() {
                valid_ibans.insert(
                    entry.country_code.clone(),
                    ValidIban {
                        electronic: entry.iban.example_electronic.clone(),
                        print: entry.iban.example_print.clone(),
                        country_name: entry.country_name.clone(),
                    },
                );
            }

            country_specs.insert(
                entry.country_code.clone(),
                CountrySpec {
                    country_name: entry.country_name.clone(),
                    iban_length: entry.iban.length,
                    bban_length: entry.bban.length,
                    iban_spec: entry.iban.spec.clone(),
                    bban_spec: entry.bban.spec.clone(),
                    sepa: entry.sepa_country,
                    positions: entry.positions.clone(),
                    effective_date: entry.effective_date.clone(),
                },
            );
        }

        debug!(
            "Projected fixtures: {} valid IBANs, {} country specs",
            valid_ibans.len(),
            country_specs.len()
        );

        Self {
            valid_ibans,
            country_specs,
            metadata: FixtureMetadata {
                total_countries: registry.len(),
                sepa_countries: registry.sepa_count(),
                source: metadata.source.clone(),
                format_version: metadata.format_version.clone(),
            },
        }
    }
}
