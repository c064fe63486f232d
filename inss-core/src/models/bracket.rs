use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ordinal identifier of a contribution bracket (1-based position in the table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BracketId(pub usize);

impl BracketId {
    /// 0-based index into the owning table's bracket slice.
    pub fn index(&self) -> usize {
        self.0 - 1
    }
}

impl fmt::Display for BracketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bracket_{}", self.0)
    }
}

/// One contiguous salary range taxed at a fixed marginal rate.
///
/// `floor` and `ceiling` are inclusive, cent-precision amounts; `rate` is a
/// fraction in `[0, 1)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBracket {
    pub floor: Decimal,
    pub ceiling: Decimal,
    pub rate: Decimal,
}

impl DeductionBracket {
    /// Width of the bracket in taxable cents: `ceiling - floor + 0.01`.
    ///
    /// The extra cent accounts for both bounds being inclusive; a salary that
    /// exactly reaches the ceiling consumes the full span.
    pub fn span(&self) -> Decimal {
        self.ceiling - self.floor + Decimal::new(1, 2)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn bracket_id_displays_report_key() {
        assert_eq!(BracketId(1).to_string(), "bracket_1");
        assert_eq!(BracketId(4).to_string(), "bracket_4");
    }

    #[test]
    fn span_includes_final_cent() {
        let bracket = DeductionBracket {
            floor: dec!(0),
            ceiling: dec!(1045.00),
            rate: dec!(0.075),
        };

        assert_eq!(bracket.span(), dec!(1045.01));
    }

    #[test]
    fn span_of_interior_bracket() {
        let bracket = DeductionBracket {
            floor: dec!(1045.01),
            ceiling: dec!(2089.60),
            rate: dec!(0.09),
        };

        assert_eq!(bracket.span(), dec!(1044.60));
    }
}
