//! Demo command: the textbook five-step lattice.
//!
//! Prices a European and an American put (S = 41, K = 40, T = 1, q = 0.01,
//! σ = 0.3, r = 0.03) on a five-step lattice with Greeks, then the same two
//! contracts with every accelerated estimator on a ten-step lattice.

use std::io::Write;

use lattice_models::instruments::{ExerciseKind, OptionContract, OptionType};
use lattice_pricing::{LatticeConfig, LatticeMethod, LatticePricer};
use tracing::info;

use crate::config::OutputFormat;
use crate::output::{write_rows, ResultRow};
use crate::Result;

const RATE: f64 = 0.03;

fn put(exercise: ExerciseKind) -> Result<OptionContract<f64>> {
    Ok(OptionContract::builder()
        .spot(41.0)
        .strike(40.0)
        .maturity(1.0)
        .dividend_yield(0.01)
        .volatility(0.3)
        .option_type(OptionType::Put)
        .exercise(exercise)
        .build()?)
}

/// Runs the demonstration scenario.
pub fn run<W: Write>(format: OutputFormat, out: W) -> Result<()> {
    info!("Pricing demonstration scenario");

    let mut rows = Vec::new();
    for (method, steps) in [
        (LatticeMethod::Plain, 5),
        (LatticeMethod::Averaged, 10),
        (LatticeMethod::Hybrid, 10),
        (LatticeMethod::Richardson, 10),
    ] {
        let config = LatticeConfig::builder()
            .steps(steps)
            .rate(RATE)
            .method(method)
            .greeks(true)
            .build()?;
        let pricer = LatticePricer::new(config);

        for exercise in [ExerciseKind::European, ExerciseKind::American] {
            let result = pricer.price(&put(exercise)?)?;
            rows.push(ResultRow::new(format!("{exercise} put"), method, steps, &result));
        }
    }

    write_rows(&rows, format, out)
}
