//! Progressive deduction calculations over a contribution table.
//!
//! Three components share one explicitly injected [`ContributionTable`]:
//! the marginal [`DeductionCalculator`], the whole-salary
//! [`BracketClassifier`], and the [`BracketAggregator`] that folds a salary
//! snapshot into per-bracket statistics.
//!
//! [`ContributionTable`]: crate::models::ContributionTable

pub mod aggregation;
pub mod classifier;
pub mod common;
pub mod deduction;

pub use aggregation::{AggregationError, BracketAggregator};
pub use classifier::{BracketClassifier, ClassifyError};
pub use deduction::{
    BracketContribution, DeductionBreakdown, DeductionCalculator, DeductionError,
};
