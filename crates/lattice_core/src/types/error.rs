//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: the categorised error every pricing call surfaces
//! - `ErrorCategory`: the category of a `PricingError`, without its message
//!
//! Layer-specific errors (instrument validation, closed-form inputs, lattice
//! construction) live in their own crates and convert into `PricingError`.

use thiserror::Error;

/// Categorised pricing errors.
///
/// Pricing is a pure computation: errors surface immediately to the caller,
/// there are no retries and no partial results.
///
/// # Variants
/// - `InvalidInput`: contract or market parameters out of their domain
/// - `Configuration`: non-positive step count, missing barrier, unsupported
///   style/method combination
/// - `NumericalDegeneracy`: zero-volatility or zero-duration lattice causing a
///   division by zero in the probability or Greek formulas
/// - `Precondition`: too few steps for a finite-difference stencil or for
///   Richardson halving
///
/// # Examples
/// ```
/// use lattice_core::types::PricingError;
///
/// let err = PricingError::Configuration("step count must be positive".to_string());
/// assert_eq!(format!("{}", err), "Configuration error: step count must be positive");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PricingError {
    /// Invalid contract or market parameter.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid pricing configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Degenerate lattice geometry.
    #[error("Numerical degeneracy: {0}")]
    NumericalDegeneracy(String),

    /// Operation precondition not met.
    #[error("Precondition violated: {0}")]
    Precondition(String),
}

/// Category of a [`PricingError`].
///
/// # Examples
/// ```
/// use lattice_core::types::{ErrorCategory, PricingError};
///
/// let err = PricingError::NumericalDegeneracy("u = d".to_string());
/// assert_eq!(err.category(), ErrorCategory::NumericalDegeneracy);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCategory {
    /// See [`PricingError::InvalidInput`].
    InvalidInput,
    /// See [`PricingError::Configuration`].
    Configuration,
    /// See [`PricingError::NumericalDegeneracy`].
    NumericalDegeneracy,
    /// See [`PricingError::Precondition`].
    Precondition,
}

impl PricingError {
    /// Returns the category of this error.
    #[inline]
    pub fn category(&self) -> ErrorCategory {
        match self {
            PricingError::InvalidInput(_) => ErrorCategory::InvalidInput,
            PricingError::Configuration(_) => ErrorCategory::Configuration,
            PricingError::NumericalDegeneracy(_) => ErrorCategory::NumericalDegeneracy,
            PricingError::Precondition(_) => ErrorCategory::Precondition,
        }
    }

    /// Returns the message carried by this error.
    #[inline]
    pub fn message(&self) -> &str {
        match self {
            PricingError::InvalidInput(msg)
            | PricingError::Configuration(msg)
            | PricingError::NumericalDegeneracy(msg)
            | PricingError::Precondition(msg) => msg,
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorCategory::InvalidInput => "invalid-input",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::NumericalDegeneracy => "numerical-degeneracy",
            ErrorCategory::Precondition => "precondition",
        };
        write!(f, "{}", name)
    }
}
