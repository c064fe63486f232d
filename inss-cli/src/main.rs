use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use inss_core::models::ContributionTable;
use inss_data::ContributionTableLoader;
use tracing::info;

use inss_cli::csv_loader::load_employees;
use inss_cli::logging;
use inss_cli::report::build_report;

/// Compute a progressive payroll-deduction (INSS) report from an employee CSV.
///
/// The employee CSV needs `name` and `salary` columns. By default the
/// built-in 2020 INSS table is used; pass --brackets to supply a revised
/// table (columns: floor, ceiling, rate).
#[derive(Parser, Debug)]
#[command(name = "inss-report")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the employee CSV file
    #[arg(short, long)]
    employees: PathBuf,

    /// Path to a bracket-table CSV overriding the built-in 2020 table
    #[arg(short, long)]
    brackets: Option<PathBuf>,
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();

    let table = match &args.brackets {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open bracket table: {}", path.display()))?;
            let table = ContributionTableLoader::load(file)
                .with_context(|| format!("Failed to load bracket table: {}", path.display()))?;
            info!(path = %path.display(), brackets = table.len(), "loaded bracket table");
            table
        }
        None => ContributionTable::inss_2020(),
    };

    let file = File::open(&args.employees)
        .with_context(|| format!("Failed to open: {}", args.employees.display()))?;
    let rows = load_employees(file)
        .with_context(|| format!("Failed to parse employee CSV: {}", args.employees.display()))?;
    info!(employees = rows.len(), "loaded employee snapshot");

    let report = build_report(&table, &rows).context("Failed to assemble report")?;

    print!("{}", report.render_text(&table));

    Ok(())
}
