//! Plain binomial backward induction.

use lattice_models::instruments::OptionContract;
use num_traits::Float;

use super::{ensure_steps, log_result};
use crate::config::{operation_name, LatticeMethod};
use crate::error::LatticeError;
use crate::greeks::{GreekStencil, LatticeResult};
use crate::lattice::{LatticeLayer, LatticeParams};

/// Prices `contract` on a binomial lattice with `params.steps()` steps.
///
/// The terminal layer is seeded from the vanilla payoff; every earlier
/// layer applies the contract's exercise rule (continuation for European,
/// early exercise for American, knock-out at or below the barrier for
/// down-and-out).
///
/// # Errors
/// - `InsufficientSteps` if Greeks are requested with fewer than 2 steps
/// - `NonFinite` if the root value or a Greek is not finite
///
/// # Examples
/// ```
/// use lattice_models::instruments::{OptionContract, OptionType};
/// use lattice_pricing::engine::price_binomial;
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
/// let result = price_binomial(&put, &params, true).unwrap();
/// assert!((result.price - 4.120_381_209).abs() < 1e-8);
/// assert!(result.delta.unwrap() < 0.0);
/// ```
pub fn price_binomial<T: Float>(
    contract: &OptionContract<T>,
    params: &LatticeParams<T>,
    with_greeks: bool,
) -> Result<LatticeResult<T>, LatticeError> {
    ensure_steps(LatticeMethod::Plain, params, with_greeks)?;

    let layer = LatticeLayer::terminal(contract.spot(), params, contract);
    let result = sweep(contract, params, layer, with_greeks, LatticeMethod::Plain)?;
    log_result(LatticeMethod::Plain, params.steps(), &result);
    Ok(result)
}

/// Walks `layer` back to the root, snapshotting the stencil layers when
/// Greeks are requested.
pub(crate) fn sweep<T: Float>(
    contract: &OptionContract<T>,
    params: &LatticeParams<T>,
    mut layer: LatticeLayer<T>,
    with_greeks: bool,
    method: LatticeMethod,
) -> Result<LatticeResult<T>, LatticeError> {
    let mut stencil = with_greeks.then(GreekStencil::new);
    if let Some(stencil) = stencil.as_mut() {
        stencil.capture(&layer);
    }

    while layer.depth() > 0 {
        layer.step_back(contract, params);
        if let Some(stencil) = stencil.as_mut() {
            stencil.capture(&layer);
        }
    }

    let root = layer.root();
    if !root.is_finite() {
        return Err(LatticeError::NonFinite {
            quantity: "option value",
        });
    }

    match stencil {
        Some(stencil) => stencil.extract(
            contract.spot(),
            root,
            params,
            operation_name(method, true),
            method.min_steps(true),
        ),
        None => Ok(LatticeResult::price_only(root)),
    }
}
