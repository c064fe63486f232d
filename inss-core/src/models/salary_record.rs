use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::{BracketClassifier, ClassifyError};
use crate::models::{BracketId, ContributionTable};

/// A transient (gross salary, bracket) pair derived from an employee row.
///
/// Records are produced fresh for each report from the current salary
/// snapshot and carry no identity or persistence of their own. Any stored
/// deduction on the source entity is ignored; the aggregator always
/// recomputes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRecord {
    pub gross_salary: Decimal,
    pub bracket_id: BracketId,
}

impl SalaryRecord {
    /// Builds a record by classifying the salary against the given table.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError`] when the salary is negative.
    pub fn classify(
        table: &ContributionTable,
        gross_salary: Decimal,
    ) -> Result<Self, ClassifyError> {
        let bracket_id = BracketClassifier::new(table).classify(gross_salary)?;
        Ok(Self {
            gross_salary,
            bracket_id,
        })
    }
}
