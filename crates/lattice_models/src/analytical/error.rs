//! Error types for closed-form pricing.

use lattice_core::types::PricingError;
use thiserror::Error;

/// Closed-form pricing errors.
///
/// # Variants
/// - `InvalidSpot`: non-positive spot price
/// - `InvalidVolatility`: non-positive volatility (the lognormal density is
///   undefined at σ = 0)
/// - `UnsupportedExerciseStyle`: style the formula cannot value
/// - `NumericalInstability`: non-finite intermediate result
///
/// # Examples
/// ```
/// use lattice_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: 0.0 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Non-positive spot price.
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price
        spot: f64,
    },

    /// Non-positive volatility.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility
        volatility: f64,
    },

    /// Exercise style without a closed form in this model.
    #[error("Unsupported exercise style: {style}")]
    UnsupportedExerciseStyle {
        /// Name of the exercise style
        style: &'static str,
    },

    /// Non-finite intermediate value.
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Description of the numerical issue
        message: String,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::InvalidSpot { .. } | AnalyticalError::InvalidVolatility { .. } => {
                PricingError::InvalidInput(err.to_string())
            }
            AnalyticalError::UnsupportedExerciseStyle { .. } => {
                PricingError::Configuration(err.to_string())
            }
            AnalyticalError::NumericalInstability { .. } => {
                PricingError::NumericalDegeneracy(err.to_string())
            }
        }
    }
}
