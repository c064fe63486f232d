//! CSV loader for employee salary input data.
//!
//! ## CSV Format
//!
//! Headers are matched by name; column order does not matter.
//!
//! | Column   | Required | Type    | Notes                        |
//! |----------|----------|---------|------------------------------|
//! | `name`   | yes      | string  | Employee display name        |
//! | `salary` | yes      | decimal | Gross salary, e.g. `1500.00` |
//!
//! ### Example
//!
//! ```csv
//! name,salary
//! Ana Souza,1500.00
//! Bruno Lima,3200.00
//! ```

use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// A single employee row as read from the CSV file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EmployeeRow {
    pub name: String,
    pub salary: Decimal,
}

/// Errors that can occur while loading employee data.
#[derive(Debug, thiserror::Error)]
pub enum EmployeeCsvError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, non-numeric salary, etc.). The `usize` is the
    /// 1-based data row number.
    #[error("CSV parse error on row {row}: {source}")]
    Parse {
        row: usize,
        #[source]
        source: csv::Error,
    },

    /// A salary cell held a negative amount. Salary positivity belongs to
    /// the data-entry boundary, so a negative here means corrupt input.
    #[error("negative salary {salary} for '{name}' on row {row}")]
    NegativeSalary {
        row: usize,
        name: String,
        salary: Decimal,
    },
}

/// Reads employee rows from a CSV source.
///
/// # Errors
///
/// Returns [`EmployeeCsvError`] on the first malformed or negative-salary
/// row; the row number in the error is 1-based (header excluded).
pub fn load_employees<R: Read>(reader: R) -> Result<Vec<EmployeeRow>, EmployeeCsvError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for (index, row) in csv_reader.deserialize::<EmployeeRow>().enumerate() {
        let row_number = index + 1;
        let row = row.map_err(|source| EmployeeCsvError::Parse {
            row: row_number,
            source,
        })?;

        if row.salary < Decimal::ZERO {
            return Err(EmployeeCsvError::NegativeSalary {
                row: row_number,
                name: row.name,
                salary: row.salary,
            });
        }

        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn load_employees_reads_all_rows() {
        let csv = "\
name,salary
Ana Souza,1500.00
Bruno Lima,3200.00
";
        let rows = load_employees(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            EmployeeRow {
                name: "Ana Souza".to_string(),
                salary: dec!(1500.00),
            },
        );
    }

    #[test]
    fn load_employees_accepts_reordered_columns() {
        let csv = "\
salary,name
950.00,Carla Dias
";
        let rows = load_employees(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].name, "Carla Dias");
        assert_eq!(rows[0].salary, dec!(950.00));
    }

    #[test]
    fn load_employees_reports_row_of_bad_salary() {
        let csv = "\
name,salary
Ana Souza,1500.00
Bruno Lima,not-a-number
";
        let error = load_employees(csv.as_bytes()).unwrap_err();

        assert!(matches!(error, EmployeeCsvError::Parse { row: 2, .. }));
    }

    #[test]
    fn load_employees_rejects_negative_salary() {
        let csv = "\
name,salary
Ana Souza,-100.00
";
        let error = load_employees(csv.as_bytes()).unwrap_err();

        assert!(matches!(
            error,
            EmployeeCsvError::NegativeSalary { row: 1, .. },
        ));
    }

    #[test]
    fn load_employees_handles_empty_file() {
        let csv = "name,salary\n";

        let rows = load_employees(csv.as_bytes()).unwrap();

        assert!(rows.is_empty());
    }
}
