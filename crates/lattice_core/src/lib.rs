//! # lattice_core: Foundation Layer for Lattice Option Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! lattice_core is the bottom layer of the workspace and provides:
//! - The categorised pricing error taxonomy (`types::error`)
//! - Standard normal distribution functions used by closed-form pricers (`math::distributions`)
//! - The `Float` trait re-export all numeric code is generic over
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other lattice_* crates:
//! - num-traits: generic floating-point arithmetic
//! - thiserror: error derivation
//! - serde: serialisation of error categories (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use lattice_core::math::distributions::norm_cdf;
//! use lattice_core::types::PricingError;
//!
//! let p = norm_cdf(0.0_f64);
//! assert!((p - 0.5).abs() < 1e-7);
//!
//! let err = PricingError::Precondition("Greeks need at least 2 steps".to_string());
//! assert!(err.to_string().contains("Precondition"));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;

/// Generic floating-point trait for all lattice and closed-form arithmetic.
///
/// # Examples
/// ```
/// use lattice_core::Float;
///
/// fn discount<T: Float>(rate: T, time: T) -> T {
///     (-rate * time).exp()
/// }
///
/// let df: f64 = discount(0.03, 1.0);
/// assert!((df - 0.970446).abs() < 1e-6);
/// ```
pub use num_traits::Float;
