//! Summary statistics and console report
//!
//! Presentation only: nothing here feeds back into the registry or the
//! fixtures.

use crate::constants::{SAMPLE_EXAMPLE_WIDTH, SAMPLE_NAME_WIDTH};
use crate::fixtures::Fixtures;
use colored::*;
use std::collections::BTreeMap;

/// A code with its country name and IBAN length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthExtreme {
    pub code: String,
    pub country_name: String,
    pub iban_length: u32,
}

/// One row of the sample table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRow {
    pub code: String,
    pub country_name: String,
    pub iban_length: u32,
    pub sepa: bool,
    pub example: String,
}

/// Summary of a fixture set for the console report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySummary {
    pub total_countries: usize,
    pub sepa_countries: usize,
    /// Number of codes per IBAN length, zero lengths excluded
    pub length_distribution: BTreeMap<u32, usize>,
    pub shortest: Option<LengthExtreme>,
    pub longest: Option<LengthExtreme>,
    pub samples: Vec<SampleRow>,
}

impl RegistrySummary {
    /// Compute the summary, taking up to `sample_count` sample rows
    pub fn from_fixtures(fixtures: &Fixtures, sample_count: usize) -> Self {
        let mut length_distribution = BTreeMap::new();
        for spec in fixtures.country_specs.values() {
            if spec.iban_length > 0 {
                *length_distribution.entry(spec.iban_length).or_insert(0) += 1;
            }
        }

        // Codes without a known length only count as shortest when nothing
        // else is known; ties go to the lowest code
        let shortest = fixtures
            .country_specs
            .iter()
            .min_by_key(|(_, spec)| match spec.iban_length {
                0 => u32::MAX,
                length => length,
            })
            .map(|(code, spec)| LengthExtreme {
                code: code.clone(),
                country_name: spec.country_name.clone(),
                iban_length: spec.iban_length,
            });

        let longest = fixtures
            .country_specs
            .iter()
            .rev()
            .max_by_key(|(_, spec)| spec.iban_length)
            .map(|(code, spec)| LengthExtreme {
                code: code.clone(),
                country_name: spec.country_name.clone(),
                iban_length: spec.iban_length,
            });

        let samples = fixtures
            .valid_ibans
            .iter()
            .take(sample_count)
            .filter_map(|(code, iban)| {
                let spec = fixtures.country_specs.get(code)?;
                Some(SampleRow {
                    code: code.clone(),
                    country_name: truncate(&spec.country_name, SAMPLE_NAME_WIDTH),
                    iban_length: spec.iban_length,
                    sepa: spec.sepa,
                    example: truncate(&iban.electronic, SAMPLE_EXAMPLE_WIDTH),
                })
            })
            .collect();

        Self {
            total_countries: fixtures.metadata.total_countries,
            sepa_countries: fixtures.metadata.sepa_countries,
            length_distribution,
            shortest,
            longest,
            samples,
        }
    }

    /// Shortest non-zero IBAN length in the distribution
    pub fn min_length(&self) -> Option<u32> {
        self.length_distribution.keys().next().copied()
    }

    /// Longest IBAN length in the distribution
    pub fn max_length(&self) -> Option<u32> {
        self.length_distribution.keys().next_back().copied()
    }

    /// Print the human-readable report to stdout
    pub fn print(&self) {
        let rule = "=".repeat(70);

        println!("\n{}", rule.bright_black());
        println!("{}", "IBAN REGISTRY SUMMARY".bright_green().bold());
        println!("{}", rule.bright_black());
        println!(
            "  {} {}",
            "Total countries/territories:".bright_cyan(),
            self.total_countries.to_string().bright_white().bold()
        );
        println!(
            "  {} {}",
            "SEPA countries:".bright_cyan(),
            self.sepa_countries.to_string().bright_white().bold()
        );

        println!("\n{}", "IBAN Length Distribution:".bright_yellow());
        for (length, count) in &self.length_distribution {
            println!("  {:2} chars: {:2} countries", length, count);
        }

        if let (Some(min), Some(max)) = (self.min_length(), self.max_length()) {
            println!("\n  {} {} characters", "Shortest IBAN:".bright_cyan(), min);
            println!("  {} {} characters", "Longest IBAN:".bright_cyan(), max);
        }

        println!(
            "\n{}",
            format!("Sample Countries (first {}):", self.samples.len()).bright_yellow()
        );
        println!(
            "{:<5} {:<35} {:<7} {:<6} Example",
            "Code", "Country Name", "Length", "SEPA"
        );
        println!("{}", "-".repeat(100).bright_black());
        for row in &self.samples {
            println!(
                "{:<5} {:<35} {:<7} {:<6} {}",
                row.code,
                row.country_name,
                row.iban_length,
                if row.sepa { "Yes" } else { "No" },
                row.example
            );
        }

        println!("\n{}", "Special Characteristics:".bright_yellow());
        if let Some(shortest) = &self.shortest {
            println!(
                "  Shortest: {} ({}) - {} chars",
                shortest.code.bright_white().bold(),
                shortest.country_name,
                shortest.iban_length
            );
        }
        if let Some(longest) = &self.longest {
            println!(
                "  Longest:  {} ({}) - {} chars",
                longest.code.bright_white().bold(),
                longest.country_name,
                longest.iban_length
            );
        }
        println!("{}", rule.bright_black());
    }
}

/// First `width` characters of `value`
fn truncate(value: &str, width: usize) -> String {
    value.chars().take(width).collect()
}
