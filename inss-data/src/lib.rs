//! CSV loader for contribution-table configuration.
//!
//! Bracket tables are data, not code: a revised fiscal-year table is loaded
//! from a CSV file and validated before any calculation sees it, so bracket
//! changes never touch calculation logic.
//!
//! ## CSV Format
//!
//! Headers are matched by name; column order does not matter.
//!
//! | Column    | Type    | Notes                                   |
//! |-----------|---------|-----------------------------------------|
//! | `floor`   | decimal | Inclusive lower bound, e.g. `1045.01`   |
//! | `ceiling` | decimal | Inclusive upper bound, e.g. `2089.60`   |
//! | `rate`    | decimal | Marginal rate as a fraction, e.g. `0.09`|
//!
//! Rows must be ordered by ascending floor; contiguity and rate-range
//! violations are reported through [`inss_core::TableError`].
//!
//! ### Example
//!
//! ```csv
//! floor,ceiling,rate
//! 0,1045.00,0.075
//! 1045.01,2089.60,0.09
//! 2089.61,3134.40,0.12
//! 3134.41,6101.06,0.14
//! ```

use std::io::Read;

use inss_core::models::{ContributionTable, DeductionBracket, TableError};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading contribution-table data.
#[derive(Debug, Error)]
pub enum TableLoaderError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    /// The parsed rows do not form a valid contribution table.
    #[error("invalid contribution table: {0}")]
    InvalidTable(#[from] TableError),
}

/// A single row from the bracket-table CSV file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRow {
    pub floor: Decimal,
    pub ceiling: Decimal,
    pub rate: Decimal,
}

/// Loads and validates contribution tables from CSV sources.
pub struct ContributionTableLoader;

impl ContributionTableLoader {
    /// Parses bracket rows from a CSV reader.
    ///
    /// # Errors
    ///
    /// Returns [`TableLoaderError::CsvParse`] on malformed CSV.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRow>, TableLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut rows = Vec::new();
        for row in csv_reader.deserialize() {
            rows.push(row?);
        }
        debug!(rows = rows.len(), "parsed bracket rows from CSV");
        Ok(rows)
    }

    /// Parses a CSV reader and builds a validated [`ContributionTable`].
    ///
    /// # Errors
    ///
    /// Returns [`TableLoaderError`] on malformed CSV or when the rows
    /// violate a table invariant (gap, overlap, out-of-range rate, non-zero
    /// first floor).
    pub fn load<R: Read>(reader: R) -> Result<ContributionTable, TableLoaderError> {
        let rows = Self::parse(reader)?;
        let brackets = rows
            .into_iter()
            .map(|row| DeductionBracket {
                floor: row.floor,
                ceiling: row.ceiling,
                rate: row.rate,
            })
            .collect();
        Ok(ContributionTable::new(brackets)?)
    }
}
