//! Per-bracket aggregation of a salary snapshot.
//!
//! A pure fold over `(salary, bracket)` records: no side effects, identical
//! output for identical input, safe to run from concurrent report requests.
//! Deductions are always recomputed through the
//! [`DeductionCalculator`](crate::calculations::DeductionCalculator); any
//! deduction value stored alongside the source records is an unmaintained
//! cache and is never consulted.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::common::{round_half_up, round_tenth};
use crate::calculations::{DeductionCalculator, DeductionError};
use crate::models::{BracketId, BracketStatistics, ContributionTable, SalaryRecord};

/// Errors that can occur while aggregating bracket statistics.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregationError {
    /// A record referenced a bracket that does not exist in the table.
    #[error("record references unknown {0}")]
    UnknownBracket(BracketId),

    /// A record's deduction could not be computed.
    #[error(transparent)]
    Deduction(#[from] DeductionError),
}

/// Folds salary records into per-bracket statistics for an injected table.
#[derive(Debug, Clone)]
pub struct BracketAggregator<'a> {
    table: &'a ContributionTable,
}

impl<'a> BracketAggregator<'a> {
    pub fn new(table: &'a ContributionTable) -> Self {
        Self { table }
    }

    /// Builds the statistics mapping for one report run.
    ///
    /// Every bracket of the table appears in the output, empty brackets
    /// included, in ascending bracket order. Percentages are rounded to one
    /// decimal place and monetary averages to two; an empty input yields
    /// all-zero statistics rather than dividing by zero.
    ///
    /// # Errors
    ///
    /// Returns [`AggregationError`] if a record carries a bracket id outside
    /// the table or a negative salary.
    pub fn aggregate(
        &self,
        records: &[SalaryRecord],
    ) -> Result<BTreeMap<BracketId, BracketStatistics>, AggregationError> {
        let mut groups: BTreeMap<BracketId, Vec<Decimal>> = self
            .table
            .bracket_ids()
            .map(|id| (id, Vec::new()))
            .collect();

        for record in records {
            groups
                .get_mut(&record.bracket_id)
                .ok_or(AggregationError::UnknownBracket(record.bracket_id))?
                .push(record.gross_salary);
        }

        let total_count = records.len() as u64;
        let calculator = DeductionCalculator::new(self.table);

        let mut statistics = BTreeMap::new();
        for (bracket_id, salaries) in groups {
            let count = salaries.len() as u64;
            if count == 0 {
                statistics.insert(bracket_id, BracketStatistics::empty(bracket_id));
                continue;
            }

            let total_salary: Decimal = salaries.iter().copied().sum();
            let mut total_deduction = Decimal::ZERO;
            for salary in &salaries {
                total_deduction += calculator.calculate(*salary)?;
            }

            statistics.insert(
                bracket_id,
                BracketStatistics {
                    bracket_id,
                    count,
                    percentage_of_total: Self::percentage(count, total_count),
                    total_salary,
                    average_salary: Self::average(total_salary, count),
                    total_deduction,
                    average_deduction: Self::average(total_deduction, count),
                },
            );
        }

        Ok(statistics)
    }

    /// Share of the total record count, rounded to one decimal place.
    fn percentage(count: u64, total_count: u64) -> Decimal {
        if total_count == 0 {
            return Decimal::ZERO;
        }
        round_tenth(Decimal::from(count) / Decimal::from(total_count) * Decimal::ONE_HUNDRED)
    }

    /// Per-record average rounded to the cent. Callers guarantee `count > 0`.
    fn average(total: Decimal, count: u64) -> Decimal {
        round_half_up(total / Decimal::from(count))
    }
}
