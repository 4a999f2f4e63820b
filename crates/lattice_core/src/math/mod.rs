//! Numerical building blocks.
//!
//! - `distributions`: standard normal CDF and PDF, generic over `T: Float`
//! - [`cast`]: lossless lifting of `f64` literals into a generic `T: Float`

pub mod distributions;

pub use distributions::{norm_cdf, norm_pdf};

use num_traits::Float;

/// Lifts an `f64` constant into `T`.
///
/// Every `Float` type can represent an `f64` literal (possibly rounded); a
/// type that cannot yields NaN, which then propagates through the
/// computation instead of panicking.
///
/// # Examples
/// ```
/// use lattice_core::math::cast;
///
/// let half: f64 = cast(0.5);
/// assert_eq!(half, 0.5);
/// let half32: f32 = cast(0.5);
/// assert_eq!(half32, 0.5_f32);
/// ```
#[inline]
pub fn cast<T: Float>(x: f64) -> T {
    T::from(x).unwrap_or_else(T::nan)
}
