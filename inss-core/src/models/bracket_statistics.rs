use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::BracketId;

/// Aggregate figures for one bracket of a report run.
///
/// Monetary fields are rounded to two decimal places and
/// `percentage_of_total` to one, matching the rendering contract of the
/// report consumers. Empty brackets carry zeros throughout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketStatistics {
    pub bracket_id: BracketId,
    pub count: u64,
    pub percentage_of_total: Decimal,
    pub total_salary: Decimal,
    pub average_salary: Decimal,
    pub total_deduction: Decimal,
    pub average_deduction: Decimal,
}

impl BracketStatistics {
    /// Statistics for a bracket with no matching records.
    pub fn empty(bracket_id: BracketId) -> Self {
        Self {
            bracket_id,
            count: 0,
            percentage_of_total: Decimal::ZERO,
            total_salary: Decimal::ZERO,
            average_salary: Decimal::ZERO,
            total_deduction: Decimal::ZERO,
            average_deduction: Decimal::ZERO,
        }
    }
}
