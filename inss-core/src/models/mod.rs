mod bracket;
mod bracket_statistics;
mod contribution_table;
mod salary_record;

pub use bracket::{BracketId, DeductionBracket};
pub use bracket_statistics::BracketStatistics;
pub use contribution_table::{ContributionTable, TableError};
pub use salary_record::SalaryRecord;
