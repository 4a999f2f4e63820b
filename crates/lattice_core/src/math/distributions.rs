//! Standard normal distribution functions.
//!
//! - `norm_cdf`: cumulative distribution function Φ(x)
//! - `norm_pdf`: probability density function φ(x)
//!
//! Both are generic over `T: Float`.

use num_traits::Float;

use super::cast as lit;

/// 1 / sqrt(2π)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Complementary error function, evaluated in double precision by `statrs`.
///
/// erfc(x) = 1 - erf(x) = (2/√π) ∫_x^∞ e^(-t²) dt
#[inline]
pub fn erfc<T: Float>(x: T) -> T {
    x.to_f64()
        .map_or_else(T::nan, |x| lit(statrs::function::erf::erfc(x)))
}

/// Standard normal cumulative distribution function.
///
/// Φ(x) = ½·erfc(-x/√2)
///
/// # Examples
/// ```
/// use lattice_core::math::distributions::norm_cdf;
///
/// assert_eq!(norm_cdf(0.0_f64), 0.5);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    lit::<T>(0.5) * erfc(-x / lit(std::f64::consts::SQRT_2))
}

/// Standard normal probability density function.
///
/// φ(x) = exp(-x²/2) / √(2π)
///
/// # Examples
/// ```
/// use lattice_core::math::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.398_942_280_4).abs() < 1e-9);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    lit::<T>(FRAC_1_SQRT_2PI) * (-x * x / lit(2.0)).exp()
}
