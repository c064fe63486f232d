use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{BracketId, DeductionBracket};

/// Errors raised when a contribution table fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// The table contained no brackets at all.
    #[error("contribution table must contain at least one bracket")]
    Empty,

    /// The first bracket must start at zero.
    #[error("first bracket floor must be 0, got {0}")]
    NonZeroFirstFloor(Decimal),

    /// A bracket's ceiling was not strictly above its floor.
    #[error("{0} ceiling {1} is not above its floor {2}")]
    InvertedBounds(BracketId, Decimal, Decimal),

    /// A bracket did not start exactly one cent above the previous ceiling.
    #[error("{0} floor {1} does not continue from previous ceiling {2}")]
    Discontinuous(BracketId, Decimal, Decimal),

    /// A marginal rate outside `[0, 1)`.
    #[error("{0} rate {1} must be in [0, 1)")]
    InvalidRate(BracketId, Decimal),
}

/// A validated, ordered progressive contribution table.
///
/// Brackets partition `[0, +inf)`: floors ascend, each bracket starts one
/// cent above the previous ceiling, and amounts past the last ceiling are
/// handled by the calculator's open-top policy. Tables are always passed
/// explicitly to the calculator, classifier, and aggregator so a revised
/// fiscal-year table is a single-point change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionTable {
    brackets: Vec<DeductionBracket>,
}

impl ContributionTable {
    /// Validates and wraps an ordered sequence of brackets.
    ///
    /// # Errors
    ///
    /// Returns [`TableError`] if the sequence is empty, does not start at
    /// zero, has gaps or overlaps between consecutive brackets, has a
    /// ceiling at or below its floor, or carries a rate outside `[0, 1)`.
    pub fn new(brackets: Vec<DeductionBracket>) -> Result<Self, TableError> {
        if brackets.is_empty() {
            return Err(TableError::Empty);
        }

        let cent = Decimal::new(1, 2);
        if brackets[0].floor != Decimal::ZERO {
            return Err(TableError::NonZeroFirstFloor(brackets[0].floor));
        }

        for (index, bracket) in brackets.iter().enumerate() {
            let id = BracketId(index + 1);

            if bracket.ceiling <= bracket.floor {
                return Err(TableError::InvertedBounds(id, bracket.ceiling, bracket.floor));
            }
            if bracket.rate < Decimal::ZERO || bracket.rate >= Decimal::ONE {
                return Err(TableError::InvalidRate(id, bracket.rate));
            }
            if index > 0 {
                let previous_ceiling = brackets[index - 1].ceiling;
                if bracket.floor != previous_ceiling + cent {
                    return Err(TableError::Discontinuous(id, bracket.floor, previous_ceiling));
                }
            }
        }

        Ok(Self { brackets })
    }

    /// The 2020 INSS contribution table (7.5% / 9% / 12% / 14%).
    pub fn inss_2020() -> Self {
        let brackets = vec![
            DeductionBracket {
                floor: Decimal::ZERO,
                ceiling: Decimal::new(104_500, 2),
                rate: Decimal::new(75, 3),
            },
            DeductionBracket {
                floor: Decimal::new(104_501, 2),
                ceiling: Decimal::new(208_960, 2),
                rate: Decimal::new(9, 2),
            },
            DeductionBracket {
                floor: Decimal::new(208_961, 2),
                ceiling: Decimal::new(313_440, 2),
                rate: Decimal::new(12, 2),
            },
            DeductionBracket {
                floor: Decimal::new(313_441, 2),
                ceiling: Decimal::new(610_106, 2),
                rate: Decimal::new(14, 2),
            },
        ];

        // The built-in table satisfies every invariant checked above.
        Self { brackets }
    }

    pub fn brackets(&self) -> &[DeductionBracket] {
        &self.brackets
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    /// Looks up a bracket by identifier.
    pub fn bracket(&self, id: BracketId) -> Option<&DeductionBracket> {
        if id.0 == 0 {
            return None;
        }
        self.brackets.get(id.index())
    }

    /// Identifiers of every bracket in table order.
    pub fn bracket_ids(&self) -> impl Iterator<Item = BracketId> + '_ {
        (1..=self.brackets.len()).map(BracketId)
    }

    /// The last (highest) bracket. The table is validated non-empty.
    pub fn top_bracket(&self) -> &DeductionBracket {
        &self.brackets[self.brackets.len() - 1]
    }

    pub fn top_bracket_id(&self) -> BracketId {
        BracketId(self.brackets.len())
    }
}
