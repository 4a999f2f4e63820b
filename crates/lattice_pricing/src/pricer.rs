//! Configuration-driven pricing façade.

use lattice_core::math::cast;
use lattice_models::analytical::{BsmPricer, ClosedFormPricer};
use lattice_models::instruments::OptionContract;
use num_traits::Float;

use crate::config::{LatticeConfig, LatticeMethod};
use crate::engine::{price_averaged, price_binomial, price_hybrid_with, price_richardson_with};
use crate::error::LatticeError;
use crate::greeks::LatticeResult;
use crate::lattice::LatticeParams;

/// Prices contracts with the estimator named in a [`LatticeConfig`].
///
/// # Examples
///
/// ```rust
/// use lattice_models::instruments::{ExerciseKind, OptionContract, OptionType};
/// use lattice_pricing::{LatticeConfig, LatticeMethod, LatticePricer};
///
/// let config = LatticeConfig::builder()
///     .steps(100)
///     .rate(0.03)
///     .method(LatticeMethod::Averaged)
///     .build()
///     .unwrap();
/// let pricer = LatticePricer::new(config);
///
/// let american = OptionContract::builder()
///     .spot(41.0_f64)
///     .strike(40.0)
///     .maturity(1.0)
///     .dividend_yield(0.01)
///     .volatility(0.3)
///     .option_type(OptionType::Put)
///     .exercise(ExerciseKind::American)
///     .build()
///     .unwrap();
///
/// let result = pricer.price(&american).unwrap();
/// assert!(result.price > 3.9 && result.price < 4.2);
/// ```
#[derive(Debug, Clone)]
pub struct LatticePricer<P = BsmPricer> {
    config: LatticeConfig,
    closed_form: P,
}

impl LatticePricer<BsmPricer> {
    /// Pricer using Black-Scholes-Merton for the hybrid methods.
    pub fn new(config: LatticeConfig) -> Self {
        Self {
            config,
            closed_form: BsmPricer,
        }
    }
}

impl<P> LatticePricer<P> {
    /// Pricer with a custom closed-form collaborator.
    pub fn with_closed_form(config: LatticeConfig, closed_form: P) -> Self {
        Self {
            config,
            closed_form,
        }
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &LatticeConfig {
        &self.config
    }

    /// Prices `contract` with the configured method, steps, rate and Greeks
    /// flag.
    ///
    /// # Errors
    /// Any error of [`LatticeConfig::validate`], [`LatticeParams::new`] or
    /// the selected engine function.
    pub fn price<T>(&self, contract: &OptionContract<T>) -> Result<LatticeResult<T>, LatticeError>
    where
        T: Float,
        P: ClosedFormPricer<T>,
    {
        self.config.validate()?;
        let params = LatticeParams::new(self.config.steps(), cast(self.config.rate()), contract)?;
        let greeks = self.config.greeks();

        match self.config.method() {
            LatticeMethod::Plain => price_binomial(contract, &params, greeks),
            LatticeMethod::Averaged => price_averaged(contract, &params, greeks),
            LatticeMethod::Hybrid => price_hybrid_with(contract, &params, greeks, &self.closed_form),
            LatticeMethod::Richardson => {
                price_richardson_with(contract, &params, greeks, &self.closed_form)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{price_hybrid, price_richardson};
    use approx::assert_relative_eq;
    use lattice_models::analytical::AnalyticalError;
    use lattice_models::instruments::OptionType;

    fn put() -> OptionContract<f64> {
        OptionContract::builder()
            .spot(41.0)
            .strike(40.0)
            .maturity(1.0)
            .dividend_yield(0.01)
            .volatility(0.3)
            .option_type(OptionType::Put)
            .build()
            .unwrap()
    }

    fn config(method: LatticeMethod, steps: usize) -> LatticeConfig {
        LatticeConfig::builder()
            .steps(steps)
            .rate(0.03)
            .method(method)
            .greeks(true)
            .build()
            .unwrap()
    }

    #[test]
    fn test_dispatch_matches_engine_functions() {
        let contract = put();
        let params = LatticeParams::new(10, 0.03, &contract).unwrap();
        let expected = [
            price_binomial(&contract, &params, true).unwrap(),
            price_averaged(&contract, &params, true).unwrap(),
            price_hybrid(&contract, &params, true).unwrap(),
            price_richardson(&contract, &params, true).unwrap(),
        ];
        for (method, expected) in LatticeMethod::ALL.into_iter().zip(expected) {
            let result = LatticePricer::new(config(method, 10)).price(&contract).unwrap();
            assert_eq!(result, expected, "{method}");
        }
    }

    #[test]
    fn test_custom_closed_form() {
        struct Doubling;
        impl ClosedFormPricer<f64> for Doubling {
            fn price(&self, c: &OptionContract<f64>, r: f64) -> Result<f64, AnalyticalError> {
                Ok(2.0 * BsmPricer.price(c, r)?)
            }
        }

        let contract = put();
        let one_step = LatticeConfig::builder()
            .steps(1)
            .rate(0.03)
            .method(LatticeMethod::Hybrid)
            .build()
            .unwrap();
        let doubled = LatticePricer::with_closed_form(one_step.clone(), Doubling)
            .price(&contract)
            .unwrap();
        let plain = LatticePricer::new(one_step).price(&contract).unwrap();
        assert_relative_eq!(doubled.price, 2.0 * plain.price, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_volatility_surfaces_degeneracy() {
        let flat = OptionContract::builder()
            .spot(41.0)
            .strike(40.0)
            .maturity(1.0)
            .volatility(0.0)
            .option_type(OptionType::Put)
            .build()
            .unwrap();
        let err = LatticePricer::new(config(LatticeMethod::Plain, 10))
            .price(&flat)
            .unwrap_err();
        assert!(matches!(err, LatticeError::DegenerateLattice { .. }));
    }
}
