//! Per-country record building and BBAN position derivation
//!
//! Transposes the column-oriented [`RegistryTable`] into one [`Record`] per
//! country column, and derives where the bank code, branch code and account
//! number sit inside each country's BBAN.

use crate::fields::{parse_int, parse_range};
use crate::models::{AccountSpec, CodeSpec, PositionRange, Positions, Record, RowLabel};
use crate::table::RegistryTable;
use tracing::debug;

/// One record per country column, in file column order
///
/// Rows shorter than the country code row are padded with empty cells.
pub fn build_records(table: &RegistryTable) -> Vec<Record> {
    let country_count = table.country_count();
    let labels: Vec<RowLabel> = table.labels().collect();

    let records: Vec<Record> = (0..country_count)
        .map(|column| {
            let mut record = Record::new();
            for &label in &labels {
                record.insert(label, table.cell(label, column).unwrap_or(""));
            }
            record
        })
        .collect();

    debug!("Built {} records from registry table", records.len());
    records
}

/// Derive bank, branch and account positions for a record
///
/// A country without a distinct branch field gets a zero-width branch code
/// immediately after the bank code. The account number is whatever follows
/// bank and branch up to the BBAN length; there is no source column for it.
pub fn process_positions(record: &Record) -> Positions {
    let bank_range = parse_range(record.get(RowLabel::BankIdentifierPosition))
        .unwrap_or(PositionRange::EMPTY);

    let branch_range = parse_range(record.get(RowLabel::BranchIdentifierPosition))
        .unwrap_or_else(|| PositionRange::empty_at(bank_range.end));

    let bban_length = parse_int(record.get(RowLabel::BbanLength));
    let account_start = bank_range.end.max(branch_range.end);

    Positions {
        bank_code: CodeSpec::new(
            bank_range,
            record.get_owned(RowLabel::BankIdentifierPattern),
            record.get_owned(RowLabel::BankIdentifierExample),
        ),
        branch_code: CodeSpec::new(
            branch_range,
            record.get_owned(RowLabel::BranchIdentifierPattern),
            record.get_owned(RowLabel::BranchIdentifierExample),
        ),
        account_code: AccountSpec {
            start: account_start,
            end: bban_length,
            example: record.get_owned(RowLabel::DomesticAccountExample),
        },
    }
}
