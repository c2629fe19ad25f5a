//! IBAN Registry Converter Library
//!
//! Converts the SWIFT IBAN Registry text release into a structured per-country
//! registry and a compact set of IBAN test fixtures.
//!
//! This library provides tools for:
//! - Reading the tab-delimited, ISO-8859-1 encoded registry release
//! - Parsing loosely formatted cells (position ranges, lengths, code lists)
//! - Deriving bank, branch and account positions within the BBAN
//! - Registering territories that share another country's IBAN rules
//! - Projecting JSON test fixtures and a console summary report

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod fields;
pub mod fixtures;
pub mod models;
pub mod processor;
pub mod record;
pub mod registry;
pub mod report;
pub mod table;

// Re-export commonly used types
pub use config::RegistryConfig;
pub use error::{IbanRegistryError, Result};
pub use fixtures::Fixtures;
pub use models::{PositionRange, Positions, Record, RegistryEntry, RowLabel};
pub use registry::Registry;
pub use table::RegistryTable;
