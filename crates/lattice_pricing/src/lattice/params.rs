//! Recombining lattice geometry.

use lattice_core::math::cast;
use lattice_models::instruments::OptionContract;
use num_traits::Float;
use tracing::{debug, warn};

use crate::config::MAX_STEPS;
use crate::error::LatticeError;

/// Cox-Ross-Rubinstein lattice parameters.
///
/// - dt = T/N
/// - u = exp(σ√dt), d = 1/u
/// - p = (exp((r - q)·dt) - d) / (u - d)
///
/// Derived once per pricing pass and never modified; a pass needing a
/// different step count builds a new instance with [`LatticeParams::new`].
///
/// # Examples
/// ```
/// use lattice_models::instruments::{OptionContract, OptionType};
/// use lattice_pricing::LatticeParams;
///
/// let contract = OptionContract::builder()
///     .spot(41.0_f64)
///     .strike(40.0)
///     .maturity(1.0)
///     .dividend_yield(0.01)
///     .volatility(0.3)
///     .option_type(OptionType::Put)
///     .build()
///     .unwrap();
///
/// let params = LatticeParams::new(2, 0.03, &contract).unwrap();
/// assert!((params.up() * params.down() - 1.0).abs() < 1e-15);
/// assert!((params.prob() - 0.470_676_710_104_443_7).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeParams<T: Float> {
    steps: usize,
    rate: T,
    dt: T,
    up: T,
    down: T,
    prob: T,
}

impl<T: Float> LatticeParams<T> {
    /// Derives the lattice for `steps` steps over the contract's maturity.
    ///
    /// # Errors
    /// - `InvalidStepCount` if `steps` is 0 or above [`MAX_STEPS`]
    /// - `InvalidRate` if `rate` is not finite
    /// - `DegenerateLattice` if u = d (zero volatility), or if S0·d^N underflows to zero
    /// - `NonFinite` if S0·u^N overflows, or if the up-probability is NaN or infinite
    pub fn new(steps: usize, rate: T, contract: &OptionContract<T>) -> Result<Self, LatticeError> {
        if steps == 0 || steps > MAX_STEPS {
            return Err(LatticeError::InvalidStepCount { steps });
        }
        if !rate.is_finite() {
            return Err(LatticeError::InvalidRate {
                rate: rate.to_f64().unwrap_or(f64::NAN),
            });
        }

        let dt = contract.maturity() / cast(steps as f64);
        let up = (contract.volatility() * dt.sqrt()).exp();
        let down = T::one() / up;
        if !(up > down) {
            return Err(LatticeError::DegenerateLattice {
                up: up.to_f64().unwrap_or(f64::NAN),
                down: down.to_f64().unwrap_or(f64::NAN),
            });
        }

        // Extreme nodes of the terminal layer must stay representable
        let exponent = steps as i32;
        if !(contract.spot() * up.powi(exponent)).is_finite() {
            return Err(LatticeError::NonFinite {
                quantity: "terminal spot",
            });
        }
        if !(contract.spot() * down.powi(exponent) > T::zero()) {
            return Err(LatticeError::DegenerateLattice {
                up: up.to_f64().unwrap_or(f64::NAN),
                down: down.to_f64().unwrap_or(f64::NAN),
            });
        }

        let growth = ((rate - contract.dividend_yield()) * dt).exp();
        let prob = (growth - down) / (up - down);
        if !prob.is_finite() {
            return Err(LatticeError::NonFinite {
                quantity: "risk-neutral probability",
            });
        }

        let (dt_f, up_f, prob_f) = (
            dt.to_f64().unwrap_or(f64::NAN),
            up.to_f64().unwrap_or(f64::NAN),
            prob.to_f64().unwrap_or(f64::NAN),
        );
        if prob < T::zero() || prob > T::one() {
            warn!(
                steps,
                dt = dt_f,
                prob = prob_f,
                "risk-neutral probability outside [0, 1]; lattice admits arbitrage"
            );
        }
        debug!(steps, dt = dt_f, up = up_f, prob = prob_f, "lattice geometry");

        Ok(Self {
            steps,
            rate,
            dt,
            up,
            down,
            prob,
        })
    }

    /// Same contract and rate, different step count.
    pub fn with_steps(
        &self,
        steps: usize,
        contract: &OptionContract<T>,
    ) -> Result<Self, LatticeError> {
        Self::new(steps, self.rate, contract)
    }

    /// Number of steps (N).
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Risk-free rate (r).
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Step length in years (dt).
    #[inline]
    pub fn dt(&self) -> T {
        self.dt
    }

    /// Up factor (u).
    #[inline]
    pub fn up(&self) -> T {
        self.up
    }

    /// Down factor (d = 1/u).
    #[inline]
    pub fn down(&self) -> T {
        self.down
    }

    /// Risk-neutral up-probability (p).
    #[inline]
    pub fn prob(&self) -> T {
        self.prob
    }

    /// One-step discount factor exp(-r·dt).
    #[inline]
    pub fn discount(&self) -> T {
        (-self.rate * self.dt).exp()
    }

    /// Underlying price at node `node` of layer `depth`: S0·u^(depth-node)·d^node.
    #[inline]
    pub fn node_spot(&self, spot: T, depth: usize, node: usize) -> T {
        spot * self.up.powi((depth - node) as i32) * self.down.powi(node as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lattice_models::instruments::OptionType;

    fn contract(volatility: f64) -> OptionContract<f64> {
        OptionContract::builder()
            .spot(41.0)
            .strike(40.0)
            .maturity(1.0)
            .dividend_yield(0.01)
            .volatility(volatility)
            .option_type(OptionType::Put)
            .build()
            .unwrap()
    }

    #[test]
    fn test_two_step_geometry() {
        let params = LatticeParams::new(2, 0.03, &contract(0.3)).unwrap();
        assert_eq!(params.steps(), 2);
        assert_eq!(params.dt(), 0.5);
        assert_relative_eq!(params.up(), 1.236_311_109_843_787_8, epsilon = 1e-14);
        assert_relative_eq!(params.prob(), 0.470_676_710_104_443_7, epsilon = 1e-12);
        assert_relative_eq!(params.up() * params.down(), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_zero_steps_rejected() {
        let result = LatticeParams::new(0, 0.03, &contract(0.3));
        assert_eq!(result, Err(LatticeError::InvalidStepCount { steps: 0 }));
    }

    #[test]
    fn test_zero_volatility_is_degenerate() {
        let result = LatticeParams::new(10, 0.03, &contract(0.0));
        assert!(matches!(
            result,
            Err(LatticeError::DegenerateLattice { .. })
        ));
    }

    #[test]
    fn test_non_finite_rate_rejected() {
        let result = LatticeParams::new(10, f64::INFINITY, &contract(0.3));
        assert!(matches!(result, Err(LatticeError::InvalidRate { .. })));
    }

    #[test]
    fn test_probability_outside_unit_interval_still_prices() {
        // Tiny volatility with large carry pushes p above one
        let params = LatticeParams::new(4, 0.5, &contract(1e-4)).unwrap();
        assert!(params.prob() > 1.0);
    }

    #[test]
    fn test_terminal_overflow_rejected() {
        // σ·√(T·N) ≈ 1342, so S0·u^N is past f64::MAX
        let wide = OptionContract::builder()
            .spot(41.0)
            .strike(40.0)
            .maturity(10.0)
            .volatility(3.0)
            .option_type(OptionType::Put)
            .build()
            .unwrap();
        let result = LatticeParams::new(20_000, 0.03, &wide);
        assert_eq!(
            result,
            Err(LatticeError::NonFinite {
                quantity: "terminal spot"
            })
        );
        assert!(LatticeParams::new(200, 0.03, &wide).is_ok());
    }

    #[test]
    fn test_node_spot_recombines() {
        let params = LatticeParams::new(5, 0.03, &contract(0.3)).unwrap();
        // up then down returns to the spot
        assert_relative_eq!(params.node_spot(41.0, 2, 1), 41.0, epsilon = 1e-12);
        assert_relative_eq!(
            params.node_spot(41.0, 3, 0),
            41.0 * params.up().powi(3),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_with_steps_rebuilds() {
        let c = contract(0.3);
        let params = LatticeParams::new(10, 0.03, &c).unwrap();
        let half = params.with_steps(5, &c).unwrap();
        assert_eq!(half.steps(), 5);
        assert_eq!(half.rate(), params.rate());
        assert_relative_eq!(half.dt(), 2.0 * params.dt(), epsilon = 1e-15);
    }
}
