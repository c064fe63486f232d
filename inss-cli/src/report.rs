//! Report assembly: turns a salary snapshot into summary figures and
//! chart-ready series.
//!
//! Everything here is presentation-side plumbing over the calculation core:
//! the deduction and classification semantics live in `inss-core` and are
//! never re-derived, so the printed report cannot drift from the per-salary
//! figures the same build produces elsewhere.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use inss_core::calculations::{AggregationError, ClassifyError};
use inss_core::models::{BracketId, BracketStatistics, ContributionTable, SalaryRecord};
use inss_core::{BracketAggregator, DeductionCalculator, DeductionError};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::csv_loader::EmployeeRow;

/// Errors that can occur while assembling a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    #[error(transparent)]
    Deduction(#[from] DeductionError),
}

/// One row of the per-employee listing: name, gross salary, and the
/// deduction recomputed live for this report run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeLine {
    pub name: String,
    pub gross_salary: Decimal,
    pub deduction: Decimal,
    pub net_salary: Decimal,
    pub bracket_id: BracketId,
}

/// A label/value pairing ready for a chart consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<Decimal>,
}

/// The assembled report for one snapshot of employee salaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollReport {
    pub headcount: u64,
    pub total_salary: Decimal,
    pub average_salary: Decimal,
    pub employees: Vec<EmployeeLine>,
    pub statistics: BTreeMap<BracketId, BracketStatistics>,
}

/// Builds the full report from the current salary snapshot.
///
/// Classification, per-employee deductions, and aggregation all run against
/// the same injected table within this one call.
///
/// # Errors
///
/// Returns [`ReportError`] when a row carries a negative salary.
pub fn build_report(
    table: &ContributionTable,
    rows: &[EmployeeRow],
) -> Result<PayrollReport, ReportError> {
    let calculator = DeductionCalculator::new(table);

    let mut records = Vec::with_capacity(rows.len());
    let mut employees = Vec::with_capacity(rows.len());
    let mut total_salary = Decimal::ZERO;

    for row in rows {
        let record = SalaryRecord::classify(table, row.salary)?;
        let deduction = calculator.calculate(row.salary)?;

        total_salary += row.salary;
        employees.push(EmployeeLine {
            name: row.name.clone(),
            gross_salary: row.salary,
            deduction,
            net_salary: row.salary - deduction,
            bracket_id: record.bracket_id,
        });
        records.push(record);
    }

    let statistics = BracketAggregator::new(table).aggregate(&records)?;

    let headcount = rows.len() as u64;
    let average_salary = if headcount == 0 {
        Decimal::ZERO
    } else {
        (total_salary / Decimal::from(headcount))
            .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
    };

    debug!(headcount, %total_salary, "assembled payroll report");

    Ok(PayrollReport {
        headcount,
        total_salary,
        average_salary,
        employees,
        statistics,
    })
}

impl PayrollReport {
    /// Employee-count-per-bracket series for a bar chart.
    pub fn headcount_series(&self, table: &ContributionTable) -> ChartSeries {
        ChartSeries {
            title: "Employees per bracket".to_string(),
            labels: bracket_labels(table),
            values: self
                .statistics
                .values()
                .map(|s| Decimal::from(s.count))
                .collect(),
        }
    }

    /// Total-deduction-per-bracket series for a distribution chart.
    pub fn deduction_series(&self, table: &ContributionTable) -> ChartSeries {
        ChartSeries {
            title: "Total INSS per bracket".to_string(),
            labels: bracket_labels(table),
            values: self
                .statistics
                .values()
                .map(|s| s.total_deduction)
                .collect(),
        }
    }

    /// Renders the report as plain text.
    ///
    /// Monetary values always carry exactly two decimal digits and
    /// percentages exactly one.
    pub fn render_text(&self, table: &ContributionTable) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "Payroll deduction report");
        let _ = writeln!(out, "========================");
        let _ = writeln!(out, "Employees:      {}", self.headcount);
        let _ = writeln!(out, "Total salary:   R$ {:.2}", self.total_salary);
        let _ = writeln!(out, "Average salary: R$ {:.2}", self.average_salary);
        let _ = writeln!(out);

        let labels = bracket_labels(table);
        for (stats, label) in self.statistics.values().zip(labels) {
            let _ = writeln!(out, "{label}");
            let _ = writeln!(
                out,
                "  employees: {} ({:.1}%)",
                stats.count, stats.percentage_of_total,
            );
            let _ = writeln!(
                out,
                "  salary:    total R$ {:.2}, average R$ {:.2}",
                stats.total_salary, stats.average_salary,
            );
            let _ = writeln!(
                out,
                "  deduction: total R$ {:.2}, average R$ {:.2}",
                stats.total_deduction, stats.average_deduction,
            );
        }

        if !self.employees.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Per-employee deductions");
            for line in &self.employees {
                let _ = writeln!(
                    out,
                    "  {} [{}]: gross R$ {:.2}, INSS R$ {:.2}, net R$ {:.2}",
                    line.name, line.bracket_id, line.gross_salary, line.deduction, line.net_salary,
                );
            }
        }

        out
    }
}

fn bracket_labels(table: &ContributionTable) -> Vec<String> {
    table
        .brackets()
        .iter()
        .enumerate()
        .map(|(index, bracket)| {
            format!(
                "Bracket {} (R$ {:.2} to R$ {:.2} at {:.1}%)",
                index + 1,
                bracket.floor,
                bracket.ceiling,
                bracket.rate * Decimal::ONE_HUNDRED,
            )
        })
        .collect()
}
