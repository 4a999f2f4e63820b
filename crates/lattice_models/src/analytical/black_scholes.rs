//! Black-Scholes-Merton pricing with continuous dividend yield.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T

use lattice_core::math::{cast, norm_cdf, norm_pdf};
use num_traits::Float;

use super::error::AnalyticalError;
use super::ClosedFormPricer;
use crate::instruments::{ExerciseStyle, OptionContract, OptionType};

/// Expiries at or below this are treated as already expired.
const EXPIRY_EPSILON: f64 = 1e-10;

/// Analytical sensitivities of a European option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticGreeks<T: Float> {
    /// ∂V/∂S
    pub delta: T,
    /// ∂²V/∂S²
    pub gamma: T,
    /// ∂V/∂t, per year of calendar time
    pub theta: T,
}

/// Black-Scholes-Merton model for European options on a dividend-paying
/// underlying.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float`
///
/// # Examples
/// ```
/// use lattice_models::analytical::BlackScholesMerton;
///
/// let bsm = BlackScholesMerton::new(41.0_f64, 0.03, 0.01, 0.3).unwrap();
/// let call = bsm.price_call(40.0, 1.0);
/// let put = bsm.price_put(40.0, 1.0);
///
/// // Put-call parity: C - P = S·e^(-qT) - K·e^(-rT)
/// let forward_gap = 41.0 * (-0.01_f64).exp() - 40.0 * (-0.03_f64).exp();
/// assert!((call - put - forward_gap).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlackScholesMerton<T: Float> {
    /// Spot price (S)
    spot: T,
    /// Risk-free interest rate (r)
    rate: T,
    /// Continuous dividend yield (q)
    dividend_yield: T,
    /// Volatility (σ)
    volatility: T,
}

impl<T: Float> BlackScholesMerton<T> {
    /// Creates a new model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    ///
    /// # Examples
    /// ```
    /// use lattice_models::analytical::BlackScholesMerton;
    ///
    /// assert!(BlackScholesMerton::new(100.0_f64, 0.05, 0.0, 0.2).is_ok());
    /// assert!(BlackScholesMerton::new(-100.0_f64, 0.05, 0.0, 0.2).is_err());
    /// assert!(BlackScholesMerton::new(100.0_f64, 0.05, 0.0, 0.0).is_err());
    /// ```
    pub fn new(spot: T, rate: T, dividend_yield: T, volatility: T) -> Result<Self, AnalyticalError> {
        if !(spot > T::zero()) {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !(volatility > T::zero()) {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            spot,
            rate,
            dividend_yield,
            volatility,
        })
    }

    /// Builds the model from a contract's market fields.
    pub fn from_contract(contract: &OptionContract<T>, rate: T) -> Result<Self, AnalyticalError> {
        Self::new(
            contract.spot(),
            rate,
            contract.dividend_yield(),
            contract.volatility(),
        )
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> T {
        self.dividend_yield
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let half = cast::<T>(0.5);
        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let drift =
            (self.rate - self.dividend_yield + half * self.volatility * self.volatility) * expiry;
        ((self.spot / strike).ln() + drift) / vol_sqrt_t
    }

    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    #[inline]
    fn is_expired(expiry: T) -> bool {
        expiry <= cast(EXPIRY_EPSILON)
    }

    /// European call price.
    ///
    /// Returns the undiscounted intrinsic value when the option has expired.
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        if Self::is_expired(expiry) {
            return OptionType::Call.payoff(self.spot, strike);
        }
        let d1 = self.d1(strike, expiry);
        let d2 = d1 - self.volatility * expiry.sqrt();
        let carry = (-self.dividend_yield * expiry).exp();
        let df = (-self.rate * expiry).exp();
        self.spot * carry * norm_cdf(d1) - strike * df * norm_cdf(d2)
    }

    /// European put price.
    ///
    /// Returns the undiscounted intrinsic value when the option has expired.
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        if Self::is_expired(expiry) {
            return OptionType::Put.payoff(self.spot, strike);
        }
        let d1 = self.d1(strike, expiry);
        let d2 = d1 - self.volatility * expiry.sqrt();
        let carry = (-self.dividend_yield * expiry).exp();
        let df = (-self.rate * expiry).exp();
        strike * df * norm_cdf(-d2) - self.spot * carry * norm_cdf(-d1)
    }

    /// European price for either option type.
    #[inline]
    pub fn price(&self, option_type: OptionType, strike: T, expiry: T) -> T {
        match option_type {
            OptionType::Call => self.price_call(strike, expiry),
            OptionType::Put => self.price_put(strike, expiry),
        }
    }

    /// Spot delta.
    pub fn delta(&self, option_type: OptionType, strike: T, expiry: T) -> T {
        if Self::is_expired(expiry) {
            let in_the_money = option_type.intrinsic(self.spot, strike) > T::zero();
            return match (option_type, in_the_money) {
                (OptionType::Call, true) => T::one(),
                (OptionType::Put, true) => -T::one(),
                _ => T::zero(),
            };
        }
        let carry = (-self.dividend_yield * expiry).exp();
        let n_d1 = norm_cdf(self.d1(strike, expiry));
        match option_type {
            OptionType::Call => carry * n_d1,
            OptionType::Put => carry * (n_d1 - T::one()),
        }
    }

    /// Gamma, identical for calls and puts.
    pub fn gamma(&self, strike: T, expiry: T) -> T {
        if Self::is_expired(expiry) {
            return T::zero();
        }
        let carry = (-self.dividend_yield * expiry).exp();
        let vol_sqrt_t = self.volatility * expiry.sqrt();
        carry * norm_pdf(self.d1(strike, expiry)) / (self.spot * vol_sqrt_t)
    }

    /// Theta per year.
    pub fn theta(&self, option_type: OptionType, strike: T, expiry: T) -> T {
        if Self::is_expired(expiry) {
            return T::zero();
        }
        let two = cast::<T>(2.0);
        let sqrt_t = expiry.sqrt();
        let d1 = self.d1(strike, expiry);
        let d2 = d1 - self.volatility * sqrt_t;
        let carry = (-self.dividend_yield * expiry).exp();
        let df = (-self.rate * expiry).exp();

        let decay = -self.spot * carry * norm_pdf(d1) * self.volatility / (two * sqrt_t);
        match option_type {
            OptionType::Call => {
                decay - self.rate * strike * df * norm_cdf(d2)
                    + self.dividend_yield * self.spot * carry * norm_cdf(d1)
            }
            OptionType::Put => {
                decay + self.rate * strike * df * norm_cdf(-d2)
                    - self.dividend_yield * self.spot * carry * norm_cdf(-d1)
            }
        }
    }

    /// Delta, gamma and theta in one call.
    pub fn greeks(&self, option_type: OptionType, strike: T, expiry: T) -> AnalyticGreeks<T> {
        AnalyticGreeks {
            delta: self.delta(option_type, strike, expiry),
            gamma: self.gamma(strike, expiry),
            theta: self.theta(option_type, strike, expiry),
        }
    }
}

/// [`ClosedFormPricer`] backed by [`BlackScholesMerton`].
///
/// American contracts are valued at their European price; the lattice
/// applies the early-exercise floor itself. Down-and-out contracts are
/// rejected.
///
/// # Examples
/// ```
/// use lattice_models::analytical::{BsmPricer, ClosedFormPricer};
/// use lattice_models::instruments::{OptionContract, OptionType};
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
/// let price = BsmPricer.price(&contract, 0.03).unwrap();
/// assert!((price - 3.899_157_058_930_49).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BsmPricer;

impl<T: Float> ClosedFormPricer<T> for BsmPricer {
    fn price(&self, contract: &OptionContract<T>, rate: T) -> Result<T, AnalyticalError> {
        if let ExerciseStyle::DownAndOut { .. } = contract.style() {
            return Err(AnalyticalError::UnsupportedExerciseStyle {
                style: contract.style().kind().name(),
            });
        }
        let model = BlackScholesMerton::from_contract(contract, rate)?;
        let value = model.price(contract.option_type(), contract.strike(), contract.maturity());
        if value.is_finite() {
            Ok(value)
        } else {
            Err(AnalyticalError::NumericalInstability {
                message: "closed-form price is not finite".to_string(),
            })
        }
    }
}
