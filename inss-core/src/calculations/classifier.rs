//! Whole-salary bracket classification.
//!
//! Classification assigns the entire salary to the single bracket whose
//! range contains it, for grouping and statistics. This is a different
//! concept from the marginal apportionment in
//! [`DeductionCalculator`](crate::calculations::DeductionCalculator), which
//! spreads one salary across every bracket it passes through.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{BracketId, ContributionTable};

/// Errors that can occur during bracket classification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassifyError {
    /// The gross salary was negative.
    #[error("gross salary must be non-negative, got {0}")]
    NegativeSalary(Decimal),
}

/// Assigns whole salaries to single brackets of an injected table.
#[derive(Debug, Clone)]
pub struct BracketClassifier<'a> {
    table: &'a ContributionTable,
}

impl<'a> BracketClassifier<'a> {
    pub fn new(table: &'a ContributionTable) -> Self {
        Self { table }
    }

    /// Returns the bracket containing the given salary.
    ///
    /// The match is the first bracket whose ceiling is at or above the
    /// salary; salaries above the top ceiling classify into the top bracket
    /// as a catch-all, so every non-negative salary has exactly one bracket.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::NegativeSalary`] for negative input.
    pub fn classify(&self, gross_salary: Decimal) -> Result<BracketId, ClassifyError> {
        if gross_salary < Decimal::ZERO {
            return Err(ClassifyError::NegativeSalary(gross_salary));
        }

        let id = self
            .table
            .brackets()
            .iter()
            .position(|bracket| gross_salary <= bracket.ceiling)
            .map(|index| BracketId(index + 1))
            .unwrap_or_else(|| self.table.top_bracket_id());

        Ok(id)
    }
}
