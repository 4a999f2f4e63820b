//! Estimators built from several lattice passes.

use lattice_models::analytical::{BsmPricer, ClosedFormPricer};
use lattice_models::instruments::OptionContract;
use num_traits::Float;

use super::backward::price_binomial;
use super::hybrid::price_hybrid_with;
use super::{ensure_hybrid_style, ensure_steps, log_result};
use crate::config::LatticeMethod;
use crate::error::LatticeError;
use crate::greeks::LatticeResult;
use crate::lattice::LatticeParams;

/// Mean of the binomial prices at N and N+1 steps.
///
/// Adjacent step counts oscillate on opposite sides of the continuous-time
/// value, so their mean damps the odd/even sawtooth. Greeks are averaged
/// element-wise.
///
/// # Errors
/// - `InsufficientSteps` if Greeks are requested with fewer than 2 steps
/// - `InvalidStepCount` if N+1 exceeds the step limit
pub fn price_averaged<T: Float>(
    contract: &OptionContract<T>,
    params: &LatticeParams<T>,
    with_greeks: bool,
) -> Result<LatticeResult<T>, LatticeError> {
    ensure_steps(LatticeMethod::Averaged, params, with_greeks)?;

    let next = params.with_steps(params.steps() + 1, contract)?;
    let base = price_binomial(contract, params, with_greeks)?;
    let shifted = price_binomial(contract, &next, with_greeks)?;

    let result = base.average(&shifted);
    log_result(LatticeMethod::Averaged, params.steps(), &result);
    Ok(result)
}

/// Richardson extrapolation of the Black-Scholes-Merton hybrid lattice.
///
/// See [`price_richardson_with`].
pub fn price_richardson<T: Float>(
    contract: &OptionContract<T>,
    params: &LatticeParams<T>,
    with_greeks: bool,
) -> Result<LatticeResult<T>, LatticeError> {
    price_richardson_with(contract, params, with_greeks, &BsmPricer)
}

/// Richardson extrapolation `2·hybrid(N) - hybrid(⌊N/2⌋)`.
///
/// Applied element-wise to the price and, when requested, to each Greek.
/// Each pass extracts its Greeks on its own lattice (theta uses that
/// pass's step length).
///
/// # Errors
/// - `UnsupportedStyle` for down-and-out contracts
/// - `InsufficientSteps` if N < 2, or N < 6 with Greeks (the halved lattice
///   needs 3 steps for its own stencil)
///
/// # Examples
/// ```
/// use lattice_models::analytical::BsmPricer;
/// use lattice_models::instruments::{OptionContract, OptionType};
/// use lattice_pricing::engine::price_richardson_with;
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
/// let params = LatticeParams::new(10, 0.03, &put).unwrap();
///
/// let result = price_richardson_with(&put, &params, false, &BsmPricer).unwrap();
/// assert!((result.price - 3.910_404_218_729_11).abs() < 1e-10);
/// ```
pub fn price_richardson_with<T, P>(
    contract: &OptionContract<T>,
    params: &LatticeParams<T>,
    with_greeks: bool,
    pricer: &P,
) -> Result<LatticeResult<T>, LatticeError>
where
    T: Float,
    P: ClosedFormPricer<T> + ?Sized,
{
    ensure_hybrid_style(contract, LatticeMethod::Richardson)?;
    ensure_steps(LatticeMethod::Richardson, params, with_greeks)?;

    let half = params.with_steps(params.steps() / 2, contract)?;
    let fine = price_hybrid_with(contract, params, with_greeks, pricer)?;
    let coarse = price_hybrid_with(contract, &half, with_greeks, pricer)?;

    let result = fine.extrapolate(&coarse);
    log_result(LatticeMethod::Richardson, params.steps(), &result);
    Ok(result)
}
