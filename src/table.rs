//! Tab-delimited registry table reader.
//!
//! The SWIFT IBAN Registry text release is laid out column-wise: column 0
//! holds a row label and every following column is one country. This module
//! reads it into a table keyed by [`RowLabel`] with one cell per country.

use crate::constants::FIELD_DELIMITER;
use crate::error::{IbanRegistryError, Result};
use crate::models::RowLabel;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Column-oriented view of the registry text release
#[derive(Debug, Clone, Default)]
pub struct RegistryTable {
    rows: HashMap<RowLabel, Vec<String>>,
    ignored_labels: usize,
    skipped_lines: usize,
}

impl RegistryTable {
    /// Read and parse a registry file
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => IbanRegistryError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => IbanRegistryError::Io(e),
        })?;

        debug!("Read {} bytes from {}", bytes.len(), path.display());
        Self::from_bytes(&bytes)
    }

    /// Parse raw registry bytes
    ///
    /// The release is ISO-8859-1 encoded; every byte maps to the code point of
    /// the same value so decoding cannot fail.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let text: String = bytes.iter().map(|&b| char::from(b)).collect();
        Self::parse(&text)
    }

    /// Parse already decoded registry text
    pub fn parse(text: &str) -> Result<Self> {
        let mut table = Self::default();

        // LF, CRLF and bare CR all end a line
        for line in text.lines().flat_map(|line| line.split('\r')) {
            let mut parts = line.split(FIELD_DELIMITER);

            let label = parts.next().unwrap_or("").trim();
            let cells: Vec<String> = parts.map(|cell| cell.trim().to_string()).collect();

            // Fewer than two fields means no country columns at all
            if cells.is_empty() || label.is_empty() {
                table.skipped_lines += 1;
                continue;
            }

            match RowLabel::from_label(label) {
                Some(row_label) => {
                    if table.rows.insert(row_label, cells).is_some() {
                        warn!("Duplicate registry row '{}', keeping the last one", label);
                    }
                }
                None => {
                    debug!("Ignoring unknown registry row '{}'", label);
                    table.ignored_labels += 1;
                }
            }
        }

        if !table.rows.contains_key(&RowLabel::CountryCode) {
            return Err(IbanRegistryError::missing_column(RowLabel::CountryCode.as_str()));
        }

        debug!(
            "Parsed registry table: {} known rows, {} countries, {} unknown rows, {} skipped lines",
            table.rows.len(),
            table.country_count(),
            table.ignored_labels,
            table.skipped_lines
        );

        Ok(table)
    }

    /// Number of country columns, taken from the country code row
    pub fn country_count(&self) -> usize {
        self.rows
            .get(&RowLabel::CountryCode)
            .map_or(0, |cells| cells.len())
    }

    /// Cell for a row and country column, if the row reaches that far
    pub fn cell(&self, label: RowLabel, column: usize) -> Option<&str> {
        self.rows
            .get(&label)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
    }

    /// Labels present in the table
    pub fn labels(&self) -> impl Iterator<Item = RowLabel> + '_ {
        self.rows.keys().copied()
    }

    /// Number of rows whose label was not a known registry label
    pub fn ignored_labels(&self) -> usize {
        self.ignored_labels
    }

    /// Number of blank, continuation or single-field lines
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }
}
