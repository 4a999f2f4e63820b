//! Closed-form pricing.
//!
//! This module provides:
//! - [`ClosedFormPricer`]: the seam the hybrid lattice uses to value its
//!   synthetic terminal layer
//! - [`BlackScholesMerton`]: lognormal pricing with continuous dividend yield
//! - [`BsmPricer`]: the default [`ClosedFormPricer`], backed by
//!   [`BlackScholesMerton`]

pub mod black_scholes;
pub mod error;

pub use black_scholes::{AnalyticGreeks, BlackScholesMerton, BsmPricer};
pub use error::AnalyticalError;

use num_traits::Float;

use crate::instruments::OptionContract;

/// Continuous-time pricing formula for a whole contract.
///
/// Implementations receive the contract by reference and must not depend on
/// anything but its fields and `rate`.
pub trait ClosedFormPricer<T: Float> {
    /// Prices `contract` under the risk-free `rate`.
    ///
    /// # Errors
    /// Returns `AnalyticalError` if the contract is outside the model's domain.
    fn price(&self, contract: &OptionContract<T>, rate: T) -> Result<T, AnalyticalError>;
}

