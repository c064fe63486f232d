pub mod calculations;
pub mod models;

pub use calculations::{
    BracketAggregator, BracketClassifier, DeductionCalculator,
    AggregationError, ClassifyError, DeductionError,
};
pub use models::*;
