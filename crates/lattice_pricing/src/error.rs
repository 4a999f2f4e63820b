//! Error types for the lattice engine.
//!
//! [`LatticeError`] covers lattice construction, stencil preconditions and
//! method/style combinations, and wraps the model-layer errors raised while
//! building transient contracts or calling the closed-form pricer.

use lattice_core::types::PricingError;
use lattice_models::analytical::AnalyticalError;
use lattice_models::instruments::InstrumentError;
use thiserror::Error;

use crate::config::MAX_STEPS;

/// Lattice pricing errors.
///
/// # Examples
/// ```
/// use lattice_core::types::{ErrorCategory, PricingError};
/// use lattice_pricing::LatticeError;
///
/// let err = LatticeError::InsufficientSteps {
///     operation: "binomial Greeks",
///     required: 2,
///     actual: 1,
/// };
/// assert_eq!(PricingError::from(err).category(), ErrorCategory::Precondition);
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LatticeError {
    /// Step count outside [1, MAX_STEPS].
    #[error("Invalid step count {steps}: must be in range [1, {max}]", max = MAX_STEPS)]
    InvalidStepCount {
        /// The rejected step count
        steps: usize,
    },

    /// Non-finite risk-free rate.
    #[error("Invalid rate: r = {rate}")]
    InvalidRate {
        /// The rejected rate
        rate: f64,
    },

    /// Up and down factors coincide (σ√dt ≈ 0).
    #[error("Degenerate lattice: u = {up}, d = {down}")]
    DegenerateLattice {
        /// Up factor
        up: f64,
        /// Down factor
        down: f64,
    },

    /// A probability, node value or Greek came out NaN or infinite.
    #[error("Non-finite {quantity} in lattice computation")]
    NonFinite {
        /// Name of the offending quantity
        quantity: &'static str,
    },

    /// Too few steps for the requested operation.
    #[error("{operation} requires at least {required} steps, got {actual}")]
    InsufficientSteps {
        /// Operation that was requested
        operation: &'static str,
        /// Minimum step count
        required: usize,
        /// Step count supplied
        actual: usize,
    },

    /// Exercise style not handled by the pricing method.
    #[error("{method} pricing does not support {style} exercise")]
    UnsupportedStyle {
        /// Exercise style name
        style: &'static str,
        /// Pricing method name
        method: &'static str,
    },

    /// Contract construction error.
    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    /// Closed-form pricing error.
    #[error(transparent)]
    Analytical(#[from] AnalyticalError),
}

impl From<LatticeError> for PricingError {
    fn from(err: LatticeError) -> Self {
        match err {
            LatticeError::InvalidStepCount { .. } | LatticeError::UnsupportedStyle { .. } => {
                PricingError::Configuration(err.to_string())
            }
            LatticeError::InvalidRate { .. } => PricingError::InvalidInput(err.to_string()),
            LatticeError::DegenerateLattice { .. } | LatticeError::NonFinite { .. } => {
                PricingError::NumericalDegeneracy(err.to_string())
            }
            LatticeError::InsufficientSteps { .. } => PricingError::Precondition(err.to_string()),
            LatticeError::Instrument(inner) => inner.into(),
            LatticeError::Analytical(inner) => inner.into(),
        }
    }
}
