//! Hybrid lattice with a closed-form layer one step before expiry.

use lattice_models::analytical::{BsmPricer, ClosedFormPricer};
use lattice_models::instruments::OptionContract;
use num_traits::Float;

use super::backward::sweep;
use super::{ensure_hybrid_style, ensure_steps, log_result};
use crate::config::LatticeMethod;
use crate::error::LatticeError;
use crate::greeks::LatticeResult;
use crate::lattice::{LatticeLayer, LatticeParams};

/// Hybrid lattice price using Black-Scholes-Merton on the last step.
///
/// See [`price_hybrid_with`].
pub fn price_hybrid<T: Float>(
    contract: &OptionContract<T>,
    params: &LatticeParams<T>,
    with_greeks: bool,
) -> Result<LatticeResult<T>, LatticeError> {
    price_hybrid_with(contract, params, with_greeks, &BsmPricer)
}

/// Hybrid lattice price with an explicit closed-form pricer.
///
/// The terminal layer is never built. Instead each node of layer N-1 is
/// valued by `pricer` on a copy of the contract with the node's spot and a
/// maturity of one step (floored at intrinsic value for American style),
/// and the backward sweep starts from there.
///
/// With N = 1 the result is the closed-form price at full maturity.
///
/// # Errors
/// - `UnsupportedStyle` for down-and-out contracts
/// - `InsufficientSteps` if Greeks are requested with fewer than 3 steps
/// - `Analytical` / `Instrument` if a node copy cannot be priced
///
/// # Examples
/// ```
/// use lattice_models::analytical::BsmPricer;
/// use lattice_models::instruments::{OptionContract, OptionType};
/// use lattice_pricing::engine::price_hybrid_with;
/// use lattice_pricing::LatticeParams;
///
/// let put = OptionContract::builder()
///     .spot(41.0_f64)
///     .strike(40.0)
///     .maturity(1.0)
///     .dividend_yield(0.01)
///     .volatility(0.3)
///     .option_type(OptionType::Put)
///     .build()
///     .unwrap();
/// let params = LatticeParams::new(5, 0.03, &put).unwrap();
///
/// let result = price_hybrid_with(&put, &params, false, &BsmPricer).unwrap();
/// assert!((result.price - 3.958_970_376_470_17).abs() < 1e-10);
/// ```
pub fn price_hybrid_with<T, P>(
    contract: &OptionContract<T>,
    params: &LatticeParams<T>,
    with_greeks: bool,
    pricer: &P,
) -> Result<LatticeResult<T>, LatticeError>
where
    T: Float,
    P: ClosedFormPricer<T> + ?Sized,
{
    ensure_hybrid_style(contract, LatticeMethod::Hybrid)?;
    ensure_steps(LatticeMethod::Hybrid, params, with_greeks)?;

    let dt = params.dt();
    let rate = params.rate();
    let american = contract.style().is_american();
    let layer = LatticeLayer::from_fn(
        contract.spot(),
        params.steps() - 1,
        params,
        |node_spot| -> Result<T, LatticeError> {
            let node = contract.with_spot(node_spot)?.with_maturity(dt)?;
            let value = pricer.price(&node, rate)?;
            if american {
                Ok(value.max(contract.intrinsic(node_spot)))
            } else {
                Ok(value)
            }
        },
    )?;

    let result = sweep(contract, params, layer, with_greeks, LatticeMethod::Hybrid)?;
    log_result(LatticeMethod::Hybrid, params.steps(), &result);
    Ok(result)
}
