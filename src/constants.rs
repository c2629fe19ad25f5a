//! Application constants for the IBAN registry converter
//!
//! File names, placeholder values and fixture provenance tags used
//! throughout the crate. Row labels live on [`crate::models::RowLabel`].

// =============================================================================
// File Names
// =============================================================================

/// Default SWIFT IBAN Registry text release read by the converter
pub const DEFAULT_INPUT_FILE: &str = "iban-registry-100.txt";

/// Full registry output, one entry per country or territory code
pub const REGISTRY_OUTPUT_FILE: &str = "iban_registry_full.json";

/// Reduced fixture output for IBAN format validation tests
pub const FIXTURES_OUTPUT_FILE: &str = "iban_test_fixtures.json";

// =============================================================================
// Source Format
// =============================================================================

/// Cell delimiter in the registry text release
pub const FIELD_DELIMITER: char = '\t';

/// Placeholder the registry uses for "no value"
pub const NOT_APPLICABLE: &str = "N/A";

/// Two-letter ISO 3166 code as it appears in country code cells
pub const COUNTRY_CODE_PATTERN: &str = r"[A-Z]{2}";

/// Run of ASCII digits only
pub const DIGITS_PATTERN: &str = r"[0-9]+";

/// Loosely anchored `<from> - <to>` position range, ASCII digits only
pub const POSITION_RANGE_PATTERN: &str = r"(?P<from>[0-9]+)\s*-\s*(?P<to>[0-9]+)";

// =============================================================================
// Fixture Metadata
// =============================================================================

/// Provenance tag written into fixture metadata
pub const FIXTURE_SOURCE: &str = "SWIFT IBAN Registry";

/// Registry release tag written into fixture metadata
pub const FIXTURE_FORMAT_VERSION: &str = "TXT Release 100";

// =============================================================================
// Reporting
// =============================================================================

/// Number of sample countries shown in the console report
pub const DEFAULT_SAMPLE_COUNT: usize = 15;

/// Maximum country name width in the sample table
pub const SAMPLE_NAME_WIDTH: usize = 35;

/// Maximum example IBAN width in the sample table
pub const SAMPLE_EXAMPLE_WIDTH: usize = 30;
