//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod converge;
pub mod demo;
pub mod price;

use clap::Args;
use lattice_models::instruments::{ExerciseKind, InstrumentError, OptionContract, OptionType};

/// Contract terms shared by `price` and `converge`
#[derive(Args, Debug, Clone)]
pub struct ContractArgs {
    /// Spot price of the underlying
    #[arg(long)]
    pub spot: f64,

    /// Strike price
    #[arg(short = 'k', long)]
    pub strike: f64,

    /// Time to maturity in years
    #[arg(short = 't', long)]
    pub maturity: f64,

    /// Annualised volatility
    #[arg(short = 'v', long)]
    pub volatility: f64,

    /// Continuous dividend yield
    #[arg(short = 'q', long, default_value_t = 0.0)]
    pub dividend_yield: f64,

    /// Option type (call, put)
    #[arg(long = "type", default_value = "put")]
    pub option_type: OptionType,

    /// Exercise style (european, american, down-and-out)
    #[arg(short, long, default_value = "european")]
    pub exercise: ExerciseKind,

    /// Knock-out barrier (down-and-out only)
    #[arg(short, long)]
    pub barrier: Option<f64>,
}

impl ContractArgs {
    /// Validated contract
    pub fn to_contract(&self) -> Result<OptionContract<f64>, InstrumentError> {
        let builder = OptionContract::builder()
            .spot(self.spot)
            .strike(self.strike)
            .maturity(self.maturity)
            .dividend_yield(self.dividend_yield)
            .volatility(self.volatility)
            .option_type(self.option_type)
            .exercise(self.exercise);
        match self.barrier {
            Some(barrier) => builder.barrier(barrier).build(),
            None => builder.build(),
        }
    }

    /// Short label for output rows, e.g. `american put`
    pub fn label(&self) -> String {
        format!("{} {}", self.exercise, self.option_type)
    }
}
