//! Core data structures for IBAN registry processing.
//!
//! Defines the known registry row labels, the per-country record built from
//! them, position ranges within the BBAN, and the registry entry written to
//! the full registry output.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Row labels of the SWIFT IBAN Registry text release
///
/// Labels not listed here are ignored when the table is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RowLabel {
    CountryName,
    CountryCode,
    OtherTerritories,
    SepaCountry,
    DomesticAccountExample,
    BbanStructure,
    BbanLength,
    BankIdentifierPosition,
    BankIdentifierPattern,
    BranchIdentifierPosition,
    BranchIdentifierPattern,
    BankIdentifierExample,
    BranchIdentifierExample,
    BbanExample,
    IbanStructure,
    IbanLength,
    IbanElectronicExample,
    IbanPrintExample,
    EffectiveDate,
}

impl RowLabel {
    /// Every known label, in registry document order
    pub const ALL: [RowLabel; 19] = [
        RowLabel::CountryName,
        RowLabel::CountryCode,
        RowLabel::OtherTerritories,
        RowLabel::SepaCountry,
        RowLabel::DomesticAccountExample,
        RowLabel::BbanStructure,
        RowLabel::BbanLength,
        RowLabel::BankIdentifierPosition,
        RowLabel::BankIdentifierPattern,
        RowLabel::BranchIdentifierPosition,
        RowLabel::BranchIdentifierPattern,
        RowLabel::BankIdentifierExample,
        RowLabel::BranchIdentifierExample,
        RowLabel::BbanExample,
        RowLabel::IbanStructure,
        RowLabel::IbanLength,
        RowLabel::IbanElectronicExample,
        RowLabel::IbanPrintExample,
        RowLabel::EffectiveDate,
    ];

    /// The label text as it appears in column 0 of the source file
    pub fn as_str(&self) -> &'static str {
        match self {
            RowLabel::CountryName => "Name of country",
            RowLabel::CountryCode => "IBAN prefix country code (ISO 3166)",
            RowLabel::OtherTerritories => "Country code includes other countries/territories",
            RowLabel::SepaCountry => "SEPA country",
            RowLabel::DomesticAccountExample => "Domestic account number example",
            RowLabel::BbanStructure => "BBAN structure",
            RowLabel::BbanLength => "BBAN length",
            RowLabel::BankIdentifierPosition => "Bank identifier position within the BBAN",
            RowLabel::BankIdentifierPattern => "Bank identifier pattern",
            RowLabel::BranchIdentifierPosition => "Branch identifier position within the BBAN",
            RowLabel::BranchIdentifierPattern => "Branch identifier pattern",
            RowLabel::BankIdentifierExample => "Bank identifier example",
            RowLabel::BranchIdentifierExample => "Branch identifier example",
            RowLabel::BbanExample => "BBAN example",
            RowLabel::IbanStructure => "IBAN structure",
            RowLabel::IbanLength => "IBAN length",
            RowLabel::IbanElectronicExample => "IBAN electronic format example",
            RowLabel::IbanPrintExample => "IBAN print format example",
            RowLabel::EffectiveDate => "Effective date",
        }
    }

    /// Look up a label by its exact (trimmed) source text
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|known| known.as_str() == label)
    }
}

/// One country column of the registry, keyed by row label
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    cells: HashMap<RowLabel, String>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cell value for a label, replacing any previous value
    pub fn insert(&mut self, label: RowLabel, value: impl Into<String>) {
        self.cells.insert(label, value.into());
    }

    /// Builder form of [`Record::insert`]
    pub fn with(mut self, label: RowLabel, value: impl Into<String>) -> Self {
        self.insert(label, value);
        self
    }

    /// Cell value for a label; rows missing from the source read as empty
    pub fn get(&self, label: RowLabel) -> &str {
        self.cells.get(&label).map(String::as_str).unwrap_or("")
    }

    /// Owned copy of a cell value
    pub fn get_owned(&self, label: RowLabel) -> String {
        self.get(label).to_string()
    }
}

/// Zero-indexed span within the BBAN
///
/// `start` is inclusive and `end` exclusive. `(0, 0)` is the unspecified
/// range; a zero-width range anywhere else is a real position marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionRange {
    pub start: u32,
    pub end: u32,
}

impl PositionRange {
    /// The unspecified range
    pub const EMPTY: PositionRange = PositionRange { start: 0, end: 0 };

    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Zero-width range positioned at `at`
    pub fn empty_at(at: u32) -> Self {
        Self { start: at, end: at }
    }

    /// True only for the `(0, 0)` sentinel
    pub fn is_unspecified(&self) -> bool {
        *self == Self::EMPTY
    }
}

/// Bank or branch identifier location, with its pattern and example
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSpec {
    pub start: u32,
    pub end: u32,
    pub pattern: String,
    pub example: String,
}

impl CodeSpec {
    pub fn new(range: PositionRange, pattern: String, example: String) -> Self {
        Self {
            start: range.start,
            end: range.end,
            pattern,
            example,
        }
    }
}

/// Account number location; derived from whatever follows bank and branch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSpec {
    pub start: u32,
    pub end: u32,
    pub example: String,
}

/// Layout of the three sub-fields within a BBAN
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Positions {
    pub bank_code: CodeSpec,
    pub branch_code: CodeSpec,
    pub account_code: AccountSpec,
}

/// BBAN format description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BbanFormat {
    pub spec: String,
    pub length: u32,
    pub example: String,
}

/// IBAN format description with both example renderings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IbanFormat {
    pub spec: String,
    pub length: u32,
    pub example_electronic: String,
    pub example_print: String,
}

/// Registry entry for one country or territory code
///
/// Territory entries are copies of their issuing country's entry with the
/// territory code and a `parent_country` back-reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub country_name: String,
    pub country_code: String,
    pub sepa_country: bool,
    pub bban: BbanFormat,
    pub iban: IbanFormat,
    pub positions: Positions,
    pub effective_date: String,
    pub other_territories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_country: Option<String>,
}

impl RegistryEntry {
    /// Copy of this entry registered under a territory code
    pub fn for_territory(&self, territory_code: &str) -> Self {
        Self {
            country_code: territory_code.to_string(),
            parent_country: Some(self.country_code.clone()),
            ..self.clone()
        }
    }

    pub fn is_territory(&self) -> bool {
        self.parent_country.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_label_lookup() {
        assert_eq!(
            RowLabel::from_label("IBAN prefix country code (ISO 3166)"),
            Some(RowLabel::CountryCode)
        );
        assert_eq!(RowLabel::from_label("SEPA country"), Some(RowLabel::SepaCountry));
        assert_eq!(RowLabel::from_label("Data element"), None);
        assert_eq!(RowLabel::from_label(""), None);
    }

    #[test]
    fn test_row_labels_round_trip() {
        for label in RowLabel::ALL {
            assert_eq!(RowLabel::from_label(label.as_str()), Some(label));
        }
    }

    #[test]
    fn test_record_missing_cell_is_empty() {
        let record = Record::new().with(RowLabel::CountryCode, "DE");
        assert_eq!(record.get(RowLabel::CountryCode), "DE");
        assert_eq!(record.get(RowLabel::BbanLength), "");
    }

    #[test]
    fn test_position_range_unspecified() {
        assert!(PositionRange::EMPTY.is_unspecified());
        assert!(PositionRange::default().is_unspecified());
        // zero-width marker after a bank code is still a position
        assert!(!PositionRange::empty_at(4).is_unspecified());
        assert!(!PositionRange::new(0, 8).is_unspecified());
    }

    #[test]
    fn test_territory_copy() {
        let entry = RegistryEntry {
            country_name: "France".to_string(),
            country_code: "FR".to_string(),
            sepa_country: true,
            other_territories: vec!["GF".to_string()],
            ..Default::default()
        };

        let territory = entry.for_territory("GF");
        assert_eq!(territory.country_code, "GF");
        assert_eq!(territory.parent_country.as_deref(), Some("FR"));
        assert_eq!(territory.country_name, "France");
        assert!(territory.sepa_country);
        assert!(territory.is_territory());
        assert!(!entry.is_territory());
    }

    #[test]
    fn test_parent_country_serialization() {
        let entry = RegistryEntry {
            country_code: "FR".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("parent_country").is_none());

        let json = serde_json::to_value(entry.for_territory("GF")).unwrap();
        assert_eq!(json["parent_country"], "FR");
        assert_eq!(json["country_code"], "GF");
    }
}
