//! Progressive payroll-deduction calculation (INSS contribution).
//!
//! The calculator walks the contribution table in ascending order and taxes
//! the portion of the salary falling inside each bracket at that bracket's
//! marginal rate. Per-bracket spans include the bracket's final cent (both
//! bounds are inclusive), so a salary that exactly reaches a ceiling
//! consumes the whole bracket and spills nothing into the next one.
//!
//! Rounding happens exactly once, on the accumulated total, half away from
//! zero at cent granularity. Rounding per bracket would compound cent errors
//! across brackets; the original system's two copies of this algorithm
//! disagreed on precisely that point (1500.00 came out as 119.32 in one and
//! 119.33 in the other). Under the single-rounding policy, 1500.00 → 119.32.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use inss_core::calculations::DeductionCalculator;
//! use inss_core::models::ContributionTable;
//!
//! let table = ContributionTable::inss_2020();
//! let calculator = DeductionCalculator::new(&table);
//!
//! // Full first bracket at 7.5%, full second at 9%, partial third at 12%.
//! assert_eq!(calculator.calculate(dec!(2500.00)).unwrap(), dec!(221.64));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::calculations::common::round_half_up;
use crate::models::{BracketId, ContributionTable};

/// Errors that can occur during a deduction calculation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeductionError {
    /// The gross salary was negative. Salary positivity is validated at the
    /// data-entry boundary, but the calculator still refuses out-of-domain
    /// input rather than coercing it.
    #[error("gross salary must be non-negative, got {0}")]
    NegativeSalary(Decimal),
}

/// The marginal amount contributed by a single bracket.
///
/// `amount` is rounded to the cent for display; the breakdown total is
/// rounded from the raw accumulated sum instead, so the contribution amounts
/// may differ from the total by up to a cent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketContribution {
    pub bracket_id: BracketId,
    pub taxable_span: Decimal,
    pub rate: Decimal,
    pub amount: Decimal,
}

/// Per-bracket decomposition of a deduction, for live-estimate display.
///
/// Only brackets the salary actually reaches appear in `contributions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    pub contributions: Vec<BracketContribution>,
    pub total: Decimal,
}

/// Progressive deduction calculator over an injected contribution table.
#[derive(Debug, Clone)]
pub struct DeductionCalculator<'a> {
    table: &'a ContributionTable,
}

impl<'a> DeductionCalculator<'a> {
    pub fn new(table: &'a ContributionTable) -> Self {
        Self { table }
    }

    /// Computes the total deduction for a gross salary, rounded to the cent.
    ///
    /// The result is always within `[0, gross_salary]`. Amounts above the
    /// top bracket's ceiling are taxed at the top bracket's rate, unbounded.
    ///
    /// # Errors
    ///
    /// Returns [`DeductionError::NegativeSalary`] for negative input.
    pub fn calculate(&self, gross_salary: Decimal) -> Result<Decimal, DeductionError> {
        Ok(self.calculate_with_breakdown(gross_salary)?.total)
    }

    /// Computes the deduction together with its per-bracket decomposition.
    ///
    /// # Errors
    ///
    /// Returns [`DeductionError::NegativeSalary`] for negative input.
    pub fn calculate_with_breakdown(
        &self,
        gross_salary: Decimal,
    ) -> Result<DeductionBreakdown, DeductionError> {
        if gross_salary < Decimal::ZERO {
            return Err(DeductionError::NegativeSalary(gross_salary));
        }

        let brackets = self.table.brackets();
        let top_index = brackets.len() - 1;

        let mut remaining = gross_salary;
        let mut raw_total = Decimal::ZERO;
        let mut contributions = Vec::new();

        for (index, bracket) in brackets.iter().enumerate() {
            if remaining <= Decimal::ZERO {
                break;
            }

            // The top bracket has no effective ceiling: any residual past
            // the table is taxed at its rate.
            let taxable_span = if index == top_index {
                if remaining > bracket.span() {
                    warn!(
                        salary = %gross_salary,
                        ceiling = %bracket.ceiling,
                        "salary exceeds table ceiling; residual taxed at top rate"
                    );
                }
                remaining
            } else {
                remaining.min(bracket.span())
            };

            let amount = taxable_span * bracket.rate;
            raw_total += amount;
            remaining -= taxable_span;

            contributions.push(BracketContribution {
                bracket_id: BracketId(index + 1),
                taxable_span,
                rate: bracket.rate,
                amount: round_half_up(amount),
            });
        }

        Ok(DeductionBreakdown {
            contributions,
            total: round_half_up(raw_total),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn calculate(salary: Decimal) -> Decimal {
        let table = ContributionTable::inss_2020();
        DeductionCalculator::new(&table).calculate(salary).unwrap()
    }

    // =========================================================================
    // boundary tests
    // =========================================================================

    #[test]
    fn calculate_zero_salary_is_zero() {
        assert_eq!(calculate(dec!(0)), dec!(0.00));
    }

    #[test]
    fn calculate_first_bracket_ceiling() {
        // 1045.00 * 7.5% = 78.375, rounds half away from zero.
        assert_eq!(calculate(dec!(1045.00)), dec!(78.38));
    }

    #[test]
    fn calculate_one_cent_into_second_bracket() {
        // The extra cent's marginal amount does not move the rounded total.
        assert_eq!(calculate(dec!(1045.01)), dec!(78.38));
    }

    #[test]
    fn calculate_mid_second_bracket() {
        // Single end-rounding yields 119.32, not the 119.33 that per-bracket
        // rounding would produce.
        assert_eq!(calculate(dec!(1500.00)), dec!(119.32));
    }

    #[test]
    fn calculate_mid_third_bracket() {
        // 78.37575 + 94.014 + 49.2468 = 221.63655
        assert_eq!(calculate(dec!(2500.00)), dec!(221.64));
    }

    #[test]
    fn calculate_top_bracket_ceiling() {
        assert_eq!(calculate(dec!(6101.06)), dec!(713.10));
    }

    #[test]
    fn calculate_above_table_taxes_residual_at_top_rate() {
        // 3865.59 above the third ceiling, all at 14%.
        assert_eq!(calculate(dec!(7000.00)), dec!(838.95));
    }

    #[test]
    fn calculate_rejects_negative_salary() {
        let table = ContributionTable::inss_2020();
        let calculator = DeductionCalculator::new(&table);

        let result = calculator.calculate(dec!(-100.00));

        assert_eq!(result.unwrap_err(), DeductionError::NegativeSalary(dec!(-100.00)));
    }

    // =========================================================================
    // invariant tests
    // =========================================================================

    #[test]
    fn calculate_never_exceeds_salary() {
        for salary in [
            dec!(0.01),
            dec!(500.00),
            dec!(1045.00),
            dec!(1045.01),
            dec!(2089.60),
            dec!(3134.41),
            dec!(6101.06),
            dec!(10000.00),
        ] {
            let deduction = calculate(salary);

            assert!(deduction >= dec!(0));
            assert!(deduction <= salary, "deduction {deduction} exceeds salary {salary}");
        }
    }

    #[test]
    fn calculate_is_monotone_in_salary() {
        let salaries = [
            dec!(0),
            dec!(100.00),
            dec!(1044.99),
            dec!(1045.00),
            dec!(1045.01),
            dec!(1500.00),
            dec!(2089.60),
            dec!(2089.61),
            dec!(3134.40),
            dec!(3134.41),
            dec!(6101.06),
            dec!(6101.07),
            dec!(9000.00),
        ];

        for pair in salaries.windows(2) {
            let lower = calculate(pair[0]);
            let higher = calculate(pair[1]);

            assert!(lower <= higher, "deduction decreased from {} to {}", pair[0], pair[1]);
        }
    }

    // =========================================================================
    // breakdown tests
    // =========================================================================

    #[test]
    fn breakdown_total_agrees_with_calculate() {
        let table = ContributionTable::inss_2020();
        let calculator = DeductionCalculator::new(&table);

        for salary in [dec!(800.00), dec!(1500.00), dec!(2500.00), dec!(4000.00), dec!(7000.00)] {
            let breakdown = calculator.calculate_with_breakdown(salary).unwrap();

            assert_eq!(breakdown.total, calculator.calculate(salary).unwrap());
        }
    }

    #[test]
    fn breakdown_covers_only_reached_brackets() {
        let table = ContributionTable::inss_2020();
        let calculator = DeductionCalculator::new(&table);

        let breakdown = calculator.calculate_with_breakdown(dec!(2500.00)).unwrap();

        let ids: Vec<BracketId> = breakdown
            .contributions
            .iter()
            .map(|c| c.bracket_id)
            .collect();
        assert_eq!(ids, vec![BracketId(1), BracketId(2), BracketId(3)]);
    }

    #[test]
    fn breakdown_exact_bracket_exhaustion_does_not_spill() {
        let table = ContributionTable::inss_2020();
        let calculator = DeductionCalculator::new(&table);

        // 1045.01 consumes the first bracket's span exactly (ceiling is
        // inclusive); no zero-width entry for the second bracket.
        let breakdown = calculator.calculate_with_breakdown(dec!(1045.01)).unwrap();

        assert_eq!(breakdown.contributions.len(), 1);
        assert_eq!(breakdown.contributions[0].taxable_span, dec!(1045.01));
    }

    #[test]
    fn breakdown_spans_sum_to_salary() {
        let table = ContributionTable::inss_2020();
        let calculator = DeductionCalculator::new(&table);

        let breakdown = calculator.calculate_with_breakdown(dec!(4000.00)).unwrap();

        let spanned: Decimal = breakdown.contributions.iter().map(|c| c.taxable_span).sum();
        assert_eq!(spanned, dec!(4000.00));
    }

    #[test]
    fn breakdown_is_empty_for_zero_salary() {
        let table = ContributionTable::inss_2020();
        let calculator = DeductionCalculator::new(&table);

        let breakdown = calculator.calculate_with_breakdown(dec!(0)).unwrap();

        assert!(breakdown.contributions.is_empty());
        assert_eq!(breakdown.total, dec!(0.00));
    }
}
