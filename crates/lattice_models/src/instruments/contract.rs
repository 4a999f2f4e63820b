//! Option contract definition.
//!
//! [`OptionContract`] is an immutable value: pricing components read it and
//! derive modified copies through [`OptionContract::with_spot`] and
//! [`OptionContract::with_maturity`] instead of overwriting fields.

use num_traits::Float;

use super::error::InstrumentError;
use super::exercise::{ExerciseKind, ExerciseStyle};
use super::payoff::{OptionType, Payoff};

/// Single-asset option contract.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use lattice_models::instruments::{ExerciseKind, OptionContract, OptionType};
///
/// let put = OptionContract::builder()
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
/// assert_eq!(put.strike(), 40.0);
/// assert!(put.style().is_american());
///
/// // Derived copies leave the original untouched
/// let shifted = put.with_spot(45.0).unwrap();
/// assert_eq!(shifted.spot(), 45.0);
/// assert_eq!(put.spot(), 41.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionContract<T: Float> {
    spot: T,
    strike: T,
    maturity: T,
    dividend_yield: T,
    volatility: T,
    option_type: OptionType,
    style: ExerciseStyle<T>,
}

impl<T: Float> OptionContract<T> {
    /// Creates a validated contract.
    ///
    /// # Arguments
    /// * `spot` - Current underlying price S0 (must be positive)
    /// * `strike` - Strike price K (must be positive)
    /// * `maturity` - Time to expiry T in years (must be positive)
    /// * `dividend_yield` - Continuous dividend yield q (must be finite)
    /// * `volatility` - Volatility σ (must be non-negative and finite)
    /// * `option_type` - Call or put
    /// * `style` - Exercise style, carrying the barrier for down-and-out
    ///
    /// # Errors
    /// Returns the `InstrumentError` of the first parameter out of its domain.
    pub fn new(
        spot: T,
        strike: T,
        maturity: T,
        dividend_yield: T,
        volatility: T,
        option_type: OptionType,
        style: ExerciseStyle<T>,
    ) -> Result<Self, InstrumentError> {
        validate_spot(spot)?;
        if !(strike > T::zero()) || !strike.is_finite() {
            return Err(InstrumentError::InvalidStrike {
                strike: to_f64(strike),
            });
        }
        validate_maturity(maturity)?;
        if !dividend_yield.is_finite() {
            return Err(InstrumentError::InvalidDividendYield {
                dividend_yield: to_f64(dividend_yield),
            });
        }
        if !(volatility >= T::zero()) || !volatility.is_finite() {
            return Err(InstrumentError::InvalidVolatility {
                volatility: to_f64(volatility),
            });
        }
        // Re-checks the barrier when the style was built by hand
        let style = ExerciseStyle::from_kind(style.kind(), style.barrier())?;

        Ok(Self {
            spot,
            strike,
            maturity,
            dividend_yield,
            volatility,
            option_type,
            style,
        })
    }

    /// Returns a builder for a new contract.
    pub fn builder() -> OptionContractBuilder<T> {
        OptionContractBuilder::new()
    }

    /// Returns the underlying spot price (S0).
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the strike price (K).
    #[inline]
    pub fn strike(&self) -> T {
        self.strike
    }

    /// Returns the time to expiry in years (T).
    #[inline]
    pub fn maturity(&self) -> T {
        self.maturity
    }

    /// Returns the continuous dividend yield (q).
    #[inline]
    pub fn dividend_yield(&self) -> T {
        self.dividend_yield
    }

    /// Returns the volatility (σ).
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Returns the call/put flag.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Returns the exercise style.
    #[inline]
    pub fn style(&self) -> ExerciseStyle<T> {
        self.style
    }

    /// Returns the barrier level for down-and-out contracts.
    #[inline]
    pub fn barrier(&self) -> Option<T> {
        self.style.barrier()
    }

    /// Signed exercise value at `spot`.
    #[inline]
    pub fn intrinsic(&self, spot: T) -> T {
        self.option_type.intrinsic(spot, self.strike)
    }

    /// Returns a copy of this contract with a different spot price.
    ///
    /// # Errors
    /// `InvalidSpot` if `spot` is not strictly positive.
    pub fn with_spot(&self, spot: T) -> Result<Self, InstrumentError> {
        validate_spot(spot)?;
        Ok(Self { spot, ..*self })
    }

    /// Returns a copy of this contract with a different maturity.
    ///
    /// # Errors
    /// `InvalidMaturity` if `maturity` is not strictly positive.
    pub fn with_maturity(&self, maturity: T) -> Result<Self, InstrumentError> {
        validate_maturity(maturity)?;
        Ok(Self { maturity, ..*self })
    }

    /// Returns a copy with the same economics and a different exercise style.
    ///
    /// # Errors
    /// `InvalidBarrier` if a down-and-out barrier is not strictly positive.
    pub fn with_style(&self, style: ExerciseStyle<T>) -> Result<Self, InstrumentError> {
        let style = ExerciseStyle::from_kind(style.kind(), style.barrier())?;
        Ok(Self { style, ..*self })
    }
}

impl<T: Float> Payoff<T> for OptionContract<T> {
    /// Vanilla payoff at expiry, whatever the exercise style.
    #[inline]
    fn payoff(&self, spot: T) -> T {
        self.option_type.payoff(spot, self.strike)
    }
}

#[inline]
fn to_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

fn validate_spot<T: Float>(spot: T) -> Result<(), InstrumentError> {
    if spot > T::zero() && spot.is_finite() {
        Ok(())
    } else {
        Err(InstrumentError::InvalidSpot { spot: to_f64(spot) })
    }
}

fn validate_maturity<T: Float>(maturity: T) -> Result<(), InstrumentError> {
    if maturity > T::zero() && maturity.is_finite() {
        Ok(())
    } else {
        Err(InstrumentError::InvalidMaturity {
            maturity: to_f64(maturity),
        })
    }
}

/// Builder for [`OptionContract`].
///
/// Spot, strike, maturity, volatility and option type are required. The
/// dividend yield defaults to zero and the exercise style to European.
#[derive(Debug, Clone)]
pub struct OptionContractBuilder<T: Float> {
    spot: Option<T>,
    strike: Option<T>,
    maturity: Option<T>,
    dividend_yield: T,
    volatility: Option<T>,
    option_type: Option<OptionType>,
    exercise: ExerciseKind,
    barrier: Option<T>,
}

impl<T: Float> Default for OptionContractBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> OptionContractBuilder<T> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            spot: None,
            strike: None,
            maturity: None,
            dividend_yield: T::zero(),
            volatility: None,
            option_type: None,
            exercise: ExerciseKind::European,
            barrier: None,
        }
    }

    /// Sets the underlying spot price.
    pub fn spot(mut self, spot: T) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Sets the strike price.
    pub fn strike(mut self, strike: T) -> Self {
        self.strike = Some(strike);
        self
    }

    /// Sets the time to expiry in years.
    pub fn maturity(mut self, maturity: T) -> Self {
        self.maturity = Some(maturity);
        self
    }

    /// Sets the continuous dividend yield.
    pub fn dividend_yield(mut self, dividend_yield: T) -> Self {
        self.dividend_yield = dividend_yield;
        self
    }

    /// Sets the volatility.
    pub fn volatility(mut self, volatility: T) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Sets the call/put flag.
    pub fn option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = Some(option_type);
        self
    }

    /// Sets the exercise style.
    pub fn exercise(mut self, exercise: ExerciseKind) -> Self {
        self.exercise = exercise;
        self
    }

    /// Sets the knock-out barrier level.
    pub fn barrier(mut self, barrier: T) -> Self {
        self.barrier = Some(barrier);
        self
    }

    /// Validates the fields and builds the contract.
    ///
    /// # Errors
    /// - `MissingField` if a required field was never set
    /// - `MissingBarrier` / `UnexpectedBarrier` if the barrier does not match
    ///   the exercise style
    /// - Any value error raised by [`OptionContract::new`]
    pub fn build(self) -> Result<OptionContract<T>, InstrumentError> {
        let spot = self.spot.ok_or(InstrumentError::MissingField { field: "spot" })?;
        let strike = self
            .strike
            .ok_or(InstrumentError::MissingField { field: "strike" })?;
        let maturity = self
            .maturity
            .ok_or(InstrumentError::MissingField { field: "maturity" })?;
        let volatility = self
            .volatility
            .ok_or(InstrumentError::MissingField { field: "volatility" })?;
        let option_type = self.option_type.ok_or(InstrumentError::MissingField {
            field: "option_type",
        })?;
        let style = ExerciseStyle::from_kind(self.exercise, self.barrier)?;

        OptionContract::new(
            spot,
            strike,
            maturity,
            self.dividend_yield,
            volatility,
            option_type,
            style,
        )
    }
}
