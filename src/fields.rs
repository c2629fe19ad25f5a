//! Cell parsers for the IBAN registry
//!
//! Registry cells are loosely formatted free text: lengths with units,
//! position ranges written as "1-4", lists of country codes mixed with prose.
//! Every parser here is total. Empty cells, the "N/A" placeholder and text
//! that doesn't match degrade to zero, an absent range or an empty list so
//! that one malformed country never blocks the rest of the registry.

use crate::constants::{
    COUNTRY_CODE_PATTERN, DIGITS_PATTERN, NOT_APPLICABLE, POSITION_RANGE_PATTERN,
};
use crate::models::PositionRange;
use regex::Regex;
use std::sync::LazyLock;

static DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DIGITS_PATTERN).expect("digit pattern is valid"));

static RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(POSITION_RANGE_PATTERN).expect("range pattern is valid"));

static COUNTRY_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(COUNTRY_CODE_PATTERN).expect("country code pattern is valid"));

/// True for cells that carry no value at all
fn is_blank(raw: &str) -> bool {
    raw.is_empty() || raw == NOT_APPLICABLE
}

/// Extract the first run of ASCII digits as an integer
///
/// Returns 0 for empty input, "N/A", text without digits, or a digit run too
/// large for `u32`.
pub fn parse_int(raw: &str) -> u32 {
    if is_blank(raw) {
        return 0;
    }

    DIGITS_RE
        .find(raw)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(0)
}

/// Parse a 1-based inclusive position range such as "1-4" into a zero-indexed
/// half-open [`PositionRange`] (`1-4` becomes `(0, 4)`)
///
/// The first `<digits> - <digits>` anywhere in the cell is used; surrounding
/// whitespace and any leading text are ignored. Returns `None` where the
/// registry gives no usable range, which callers treat as the empty
/// `(0, 0)` range.
pub fn parse_range(raw: &str) -> Option<PositionRange> {
    if is_blank(raw) || raw.trim().is_empty() {
        return None;
    }

    let caps = RANGE_RE.captures(raw)?;
    let from = caps["from"].parse::<u32>().ok()?;
    let to = caps["to"].parse::<u32>().ok()?;

    // Position 0 doesn't exist in a 1-based layout; clamp rather than underflow
    let start = from.saturating_sub(1);
    if to < start {
        return None;
    }

    Some(PositionRange::new(start, to)).filter(|range| !range.is_unspecified())
}

/// Every two-letter uppercase code in the cell, in order of appearance
///
/// Duplicates are kept. Matching is case-sensitive.
pub fn parse_other_territories(raw: &str) -> Vec<String> {
    if is_blank(raw) {
        return Vec::new();
    }

    COUNTRY_CODE_RE
        .find_iter(raw)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// First two-letter uppercase code in a country code cell
///
/// Tolerates annotation text around the code.
pub fn extract_country_code(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    COUNTRY_CODE_RE.find(raw).map(|m| m.as_str().to_string())
}

/// SEPA membership: the trimmed cell equals "yes", ignoring case
pub fn parse_sepa(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("yes")
}
