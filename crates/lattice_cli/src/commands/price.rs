//! Price command implementation
//!
//! Prices one contract with the configured lattice estimator.

use std::io::Write;

use lattice_pricing::LatticePricer;
use tracing::info;

use super::ContractArgs;
use crate::config::AppConfig;
use crate::output::{write_rows, ResultRow};
use crate::Result;

/// Run the price command
pub fn run<W: Write>(
    config: &AppConfig,
    args: &ContractArgs,
    greeks: bool,
    out: W,
) -> Result<()> {
    let contract = args.to_contract()?;
    let lattice = config.lattice_config(greeks)?;

    info!(
        contract = %args.label(),
        method = %config.method,
        steps = config.steps,
        greeks,
        "Starting pricing"
    );

    let result = LatticePricer::new(lattice).price(&contract)?;
    let row = ResultRow::new(args.label(), config.method, config.steps, &result);
    write_rows(&[row], config.format, out)?;

    info!(price = result.price, "Pricing complete");
    Ok(())
}
