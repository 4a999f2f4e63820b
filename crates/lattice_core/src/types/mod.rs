//! Core types shared by every layer.
//!
//! - `error`: categorised error taxonomy for pricing operations
//!
//! [`PricingError`] and [`ErrorCategory`] are re-exported at module level.

pub mod error;

pub use error::{ErrorCategory, PricingError};
