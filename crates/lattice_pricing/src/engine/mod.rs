//! Lattice pricing entry points.
//!
//! Each function takes the contract, the lattice parameters for the base
//! step count and a Greeks flag, and returns a [`LatticeResult`]:
//!
//! - [`price_binomial`]: payoff-seeded terminal layer, full backward sweep
//! - [`price_averaged`]: mean of the N and N+1 step lattices
//! - [`price_hybrid`]: closed-form values on the layer before expiry
//! - [`price_richardson`]: 2·hybrid(N) - hybrid(⌊N/2⌋)
//!
//! The hybrid pair also exists as `*_with` variants taking any
//! [`ClosedFormPricer`](lattice_models::analytical::ClosedFormPricer).

pub mod backward;
pub mod compositors;
pub mod hybrid;

pub use backward::price_binomial;
pub use compositors::{price_averaged, price_richardson, price_richardson_with};
pub use hybrid::{price_hybrid, price_hybrid_with};

use lattice_models::instruments::OptionContract;
use num_traits::Float;

use crate::config::{operation_name, LatticeMethod};
use crate::error::LatticeError;
use crate::greeks::LatticeResult;
use crate::lattice::LatticeParams;

/// Fails fast when `params` has too few steps for `method`.
fn ensure_steps<T: Float>(
    method: LatticeMethod,
    params: &LatticeParams<T>,
    with_greeks: bool,
) -> Result<(), LatticeError> {
    let required = method.min_steps(with_greeks);
    if params.steps() < required {
        return Err(LatticeError::InsufficientSteps {
            operation: operation_name(method, with_greeks),
            required,
            actual: params.steps(),
        });
    }
    Ok(())
}

/// Rejects exercise styles the closed-form terminal layer cannot value.
fn ensure_hybrid_style<T: Float>(
    contract: &OptionContract<T>,
    method: LatticeMethod,
) -> Result<(), LatticeError> {
    if contract.style().is_barrier() {
        return Err(LatticeError::UnsupportedStyle {
            style: contract.style().kind().name(),
            method: method.name(),
        });
    }
    Ok(())
}

fn log_result<T: Float>(method: LatticeMethod, steps: usize, result: &LatticeResult<T>) {
    tracing::debug!(
        %method,
        steps,
        price = result.price.to_f64().unwrap_or(f64::NAN),
        greeks = result.has_greeks(),
        "lattice price"
    );
}
