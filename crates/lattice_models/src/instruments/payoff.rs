//! Call/put flag and terminal payoff evaluation.

use std::fmt;
use std::str::FromStr;

use num_traits::Float;

use super::error::InstrumentError;

/// Option type: the right to buy (call) or sell (put) at the strike.
///
/// # Examples
/// ```
/// use lattice_models::instruments::OptionType;
///
/// assert_eq!(OptionType::Call.payoff(45.0_f64, 40.0), 5.0);
/// assert_eq!(OptionType::Put.payoff(45.0_f64, 40.0), 0.0);
///
/// // Intrinsic value is signed; early exercise compares against it directly
/// assert_eq!(OptionType::Put.intrinsic(45.0_f64, 40.0), -5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Call option: pays S - K.
    Call,
    /// Put option: pays K - S.
    Put,
}

impl OptionType {
    /// Signed exercise value: S - K for calls, K - S for puts.
    #[inline]
    pub fn intrinsic<T: Float>(&self, spot: T, strike: T) -> T {
        match self {
            OptionType::Call => spot - strike,
            OptionType::Put => strike - spot,
        }
    }

    /// Payoff at expiry: max(intrinsic, 0).
    #[inline]
    pub fn payoff<T: Float>(&self, spot: T, strike: T) -> T {
        self.intrinsic(spot, strike).max(T::zero())
    }

    /// Returns whether this is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// Returns whether this is a put.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, OptionType::Put)
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            _ => Err(InstrumentError::ParseError {
                kind: "option type",
                value: s.to_string(),
            }),
        }
    }
}

/// Payoff evaluation at a terminal spot price.
///
/// The lattice builder seeds the terminal layer through this trait, so any
/// instrument able to value itself at expiry can be priced on the lattice.
pub trait Payoff<T: Float> {
    /// Value of the instrument at expiry when the underlying is at `spot`.
    fn payoff(&self, spot: T) -> T;
}
