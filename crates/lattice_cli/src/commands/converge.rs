//! Converge command implementation
//!
//! Prices one contract over a list of step counts and reports the error
//! against the closed-form price.

use std::io::Write;

use lattice_pricing::ConvergenceStudy;
use tracing::info;

use super::ContractArgs;
use crate::config::AppConfig;
use crate::output::{write_rows, ResultRow};
use crate::Result;

/// Run the converge command
pub fn run<W: Write>(
    config: &AppConfig,
    args: &ContractArgs,
    steps: &[usize],
    greeks: bool,
    out: W,
) -> Result<()> {
    let contract = args.to_contract()?;

    info!(
        contract = %args.label(),
        method = %config.method,
        points = steps.len(),
        "Starting convergence study"
    );

    let report = ConvergenceStudy::new(config.method, config.rate)
        .with_greeks(greeks)
        .run(&contract, steps)?;

    match report.reference {
        Some(reference) => info!(reference, "Closed-form reference"),
        None => info!("No closed-form reference for {} exercise", args.exercise),
    }

    let rows: Vec<ResultRow> = report
        .points
        .iter()
        .map(|point| {
            ResultRow::new(args.label(), report.method, point.steps, &point.result)
                .with_error(point.error)
        })
        .collect();
    write_rows(&rows, config.format, out)?;

    if let Some(max_error) = report.max_abs_error() {
        info!(max_error, "Convergence study complete");
    }
    Ok(())
}
