//! Country/territory keyed IBAN registry
//!
//! Assembles per-country records into registry entries keyed by ISO country
//! code. Countries whose IBAN rules also cover other territories get an extra
//! entry per territory, copied from the issuing country with a
//! `parent_country` back-reference.

use crate::fields::{extract_country_code, parse_int, parse_other_territories, parse_sepa};
use crate::models::{BbanFormat, IbanFormat, Record, RegistryEntry, RowLabel};
use crate::record::process_positions;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use tracing::{debug, info};

/// Registry of IBAN rules keyed by country or territory code
///
/// Keys iterate in insertion order, which follows the column order of the
/// source file. The registry is built once by [`Registry::assemble`].
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Entries in insertion order
    entries: Vec<RegistryEntry>,

    /// Code to position in `entries`
    index: HashMap<String, usize>,

    /// Number of records seen during assembly
    records_processed: usize,

    /// Records without a resolvable country code
    records_skipped: usize,

    /// Territory claims dropped because the code was already registered
    territory_claims_dropped: usize,
}

impl Registry {
    /// Assemble a registry from per-country records
    ///
    /// Records without a two-letter country code are skipped. A territory
    /// code is registered by the first country that lists it; later claims
    /// from other countries are dropped.
    pub fn assemble(records: &[Record]) -> Self {
        let mut registry = Self::default();

        for record in records {
            registry.records_processed += 1;

            let raw_code = record.get(RowLabel::CountryCode);
            let Some(country_code) = extract_country_code(raw_code) else {
                debug!("Skipping record without country code: '{}'", raw_code);
                registry.records_skipped += 1;
                continue;
            };

            let entry = build_entry(record, country_code);
            let territories = entry.other_territories.clone();
            registry.insert(entry.clone());

            for territory_code in territories {
                // A country listing its own code is not a territory claim
                if territory_code == entry.country_code {
                    continue;
                }
                if registry.contains(&territory_code) {
                    debug!(
                        "Territory {} already registered, ignoring claim from {}",
                        territory_code, entry.country_code
                    );
                    registry.territory_claims_dropped += 1;
                    continue;
                }
                registry.insert(entry.for_territory(&territory_code));
            }
        }

        info!(
            "Assembled registry: {} codes ({} territories) from {} records, {} skipped",
            registry.len(),
            registry.territory_count(),
            registry.records_processed,
            registry.records_skipped
        );

        registry
    }

    /// Insert or replace an entry, keeping the original position on replace
    fn insert(&mut self, entry: RegistryEntry) {
        match self.index.get(&entry.country_code) {
            Some(&position) => {
                debug!("Replacing registry entry for {}", entry.country_code);
                self.entries[position] = entry;
            }
            None => {
                self.index
                    .insert(entry.country_code.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Entry for a country or territory code
    pub fn get(&self, code: &str) -> Option<&RegistryEntry> {
        self.index.get(code).map(|&position| &self.entries[position])
    }

    /// Check if a code is registered
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Total number of registered codes, territories included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Codes in insertion order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.country_code.as_str())
    }

    /// Entries sorted by code
    pub fn sorted(&self) -> Vec<&RegistryEntry> {
        let mut entries: Vec<&RegistryEntry> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.country_code.cmp(&b.country_code));
        entries
    }

    /// Number of entries flagged as SEPA members
    pub fn sepa_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.sepa_country).count()
    }

    /// Number of entries registered on behalf of a parent country
    pub fn territory_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_territory()).count()
    }

    pub fn records_processed(&self) -> usize {
        self.records_processed
    }

    pub fn records_skipped(&self) -> usize {
        self.records_skipped
    }

    pub fn territory_claims_dropped(&self) -> usize {
        self.territory_claims_dropped
    }
}

impl Serialize for Registry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.country_code, entry)?;
        }
        map.end()
    }
}

/// Build the registry entry for a record with a resolved country code
fn build_entry(record: &Record, country_code: String) -> RegistryEntry {
    RegistryEntry {
        country_name: record.get_owned(RowLabel::CountryName),
        country_code,
        sepa_country: parse_sepa(record.get(RowLabel::SepaCountry)),
        bban: BbanFormat {
            spec: record.get_owned(RowLabel::BbanStructure),
            length: parse_int(record.get(RowLabel::BbanLength)),
            example: record.get_owned(RowLabel::BbanExample),
        },
        iban: IbanFormat {
            spec: record.get_owned(RowLabel::IbanStructure),
            length: parse_int(record.get(RowLabel::IbanLength)),
            example_electronic: record.get_owned(RowLabel::IbanElectronicExample),
            example_print: record.get_owned(RowLabel::IbanPrintExample),
        },
        positions: process_positions(record),
        effective_date: record.get_owned(RowLabel::EffectiveDate),
        other_territories: parse_other_territories(record.get(RowLabel::OtherTerritories)),
        parent_country: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str, name: &str, territories: &str) -> Record {
        Record::new()
            .with(RowLabel::CountryCode, code)
            .with(RowLabel::CountryName, name)
            .with(RowLabel::OtherTerritories, territories)
            .with(RowLabel::SepaCountry, "Yes")
            .with(RowLabel::IbanLength, "27")
            .with(RowLabel::BbanLength, "23")
            .with(RowLabel::BankIdentifierPosition, "1-5")
    }

    #[test]
    fn test_assemble_primary_entries() {
        let registry = Registry::assemble(&[
            record("FR", "France", ""),
            record("MC", "Monaco", "N/A"),
        ]);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.codes().collect::<Vec<_>>(), vec!["FR", "MC"]);

        let france = registry.get("FR").unwrap();
        assert_eq!(france.country_name, "France");
        assert!(france.sepa_country);
        assert_eq!(france.iban.length, 27);
        assert_eq!(france.bban.length, 23);
        assert_eq!(france.positions.bank_code.end, 5);
        assert_eq!(france.positions.account_code.start, 5);
        assert_eq!(france.positions.account_code.end, 23);
        assert!(france.parent_country.is_none());
    }

    #[test]
    fn test_territory_entries() {
        let registry = Registry::assemble(&[record("FR", "France", "GF, GP, FR and PF")]);

        // FR itself is already registered and isn't re-added as a territory
        assert_eq!(registry.codes().collect::<Vec<_>>(), vec!["FR", "GF", "GP", "PF"]);
        assert_eq!(registry.territory_count(), 3);

        let guiana = registry.get("GF").unwrap();
        assert_eq!(guiana.country_code, "GF");
        assert_eq!(guiana.parent_country.as_deref(), Some("FR"));
        assert_eq!(guiana.country_name, "France");
        assert_eq!(guiana.other_territories, vec!["GF", "GP", "FR", "PF"]);
        assert_eq!(registry.territory_claims_dropped(), 0);
    }

    #[test]
    fn test_self_listed_code_is_not_a_dropped_claim() {
        let registry = Registry::assemble(&[record("FR", "France", "GF, FR")]);

        assert_eq!(registry.codes().collect::<Vec<_>>(), vec!["FR", "GF"]);
        assert!(registry.get("FR").unwrap().parent_country.is_none());
        assert_eq!(registry.get("GF").unwrap().parent_country.as_deref(), Some("FR"));
        assert_eq!(registry.territory_claims_dropped(), 0);
    }

    #[test]
    fn test_territory_first_claim_wins() {
        let registry = Registry::assemble(&[
            record("GB", "United Kingdom", "IM, JE, GG"),
            record("FR", "France", "JE"),
        ]);

        assert_eq!(registry.get("JE").unwrap().parent_country.as_deref(), Some("GB"));
        assert_eq!(registry.territory_claims_dropped(), 1);
    }

    #[test]
    fn test_territory_first_claim_follows_column_order() {
        let registry = Registry::assemble(&[
            record("FR", "France", "JE"),
            record("GB", "United Kingdom", "IM, JE, GG"),
        ]);

        assert_eq!(registry.get("JE").unwrap().parent_country.as_deref(), Some("FR"));
    }

    #[test]
    fn test_primary_replaces_earlier_territory() {
        let registry = Registry::assemble(&[
            record("FR", "France", "MC"),
            record("MC", "Monaco", ""),
        ]);

        let monaco = registry.get("MC").unwrap();
        assert_eq!(monaco.country_name, "Monaco");
        assert!(monaco.parent_country.is_none());
        assert_eq!(registry.codes().collect::<Vec<_>>(), vec!["FR", "MC"]);
    }

    #[test]
    fn test_skips_records_without_country_code() {
        let registry = Registry::assemble(&[
            record("FR", "France", ""),
            record("N/A", "Nowhere", ""),
            record("", "Blank", ""),
        ]);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.records_processed(), 3);
        assert_eq!(registry.records_skipped(), 2);
    }

    #[test]
    fn test_country_code_with_annotation() {
        let registry = Registry::assemble(&[record("GB (see note)", "United Kingdom", "")]);
        assert!(registry.contains("GB"));
    }

    #[test]
    fn test_serializes_in_insertion_order() {
        let registry = Registry::assemble(&[
            record("MC", "Monaco", ""),
            record("AD", "Andorra", ""),
        ]);

        let json = serde_json::to_string(&registry).unwrap();
        let monaco = json.find("\"MC\"").unwrap();
        let andorra = json.find("\"AD\"").unwrap();
        assert!(monaco < andorra);

        let sorted: Vec<&str> = registry
            .sorted()
            .iter()
            .map(|entry| entry.country_code.as_str())
            .collect();
        assert_eq!(sorted, vec!["AD", "MC"]);
    }

    #[test]
    fn test_sepa_count() {
        let registry = Registry::assemble(&[
            record("FR", "France", "GF"),
            record("TR", "Turkey", "").with(RowLabel::SepaCountry, "No"),
        ]);

        assert_eq!(registry.sepa_count(), 2); // FR and its territory GF
    }
}
