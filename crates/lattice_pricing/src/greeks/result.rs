//! Lattice pricing result type.
//!
//! Provides [`LatticeResult<T>`], the price with optional lattice Greeks, and
//! the element-wise combinations the accelerated estimators are built from.

use num_traits::Float;

/// Price and optional lattice Greeks.
///
/// The Greeks are either all present or all absent: a pass run without
/// Greek extraction fills only `price`.
///
/// - `delta`: ∂V/∂S from the depth-1 nodes
/// - `gamma`: ∂²V/∂S² from the depth-2 nodes
/// - `theta`: ∂V/∂t from the middle depth-2 node and the root
///
/// # Examples
///
/// ```rust
/// use lattice_pricing::LatticeResult;
///
/// let fine: LatticeResult<f64> = LatticeResult::with_greeks(3.91, -0.378, 0.030, -1.83);
/// let coarse = LatticeResult::with_greeks(3.93, -0.379, 0.031, -1.90);
///
/// let extrapolated = fine.extrapolate(&coarse);
/// assert!((extrapolated.price - 3.89).abs() < 1e-12);
///
/// let (price, delta, gamma, theta) = extrapolated.greeks().unwrap();
/// assert_eq!(price, extrapolated.price);
/// assert!(delta < 0.0 && gamma > 0.0 && theta < 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeResult<T: Float> {
    /// Present value of the option.
    pub price: T,
    /// Delta: ∂V/∂S.
    pub delta: Option<T>,
    /// Gamma: ∂²V/∂S².
    pub gamma: Option<T>,
    /// Theta: ∂V/∂t per year.
    pub theta: Option<T>,
}

impl<T: Float> LatticeResult<T> {
    /// Result holding only a price.
    #[inline]
    pub fn price_only(price: T) -> Self {
        Self {
            price,
            delta: None,
            gamma: None,
            theta: None,
        }
    }

    /// Result holding a price and all three Greeks.
    #[inline]
    pub fn with_greeks(price: T, delta: T, gamma: T, theta: T) -> Self {
        Self {
            price,
            delta: Some(delta),
            gamma: Some(gamma),
            theta: Some(theta),
        }
    }

    /// Returns true when delta, gamma and theta are all present.
    #[inline]
    pub fn has_greeks(&self) -> bool {
        self.delta.is_some() && self.gamma.is_some() && self.theta.is_some()
    }

    /// The (price, Delta, Gamma, Theta) tuple, if Greeks were extracted.
    pub fn greeks(&self) -> Option<(T, T, T, T)> {
        Some((self.price, self.delta?, self.gamma?, self.theta?))
    }

    /// Element-wise arithmetic mean of two results.
    ///
    /// A Greek is present only if both inputs carry it.
    pub fn average(&self, other: &Self) -> Self {
        let two = T::one() + T::one();
        self.combine(other, |a, b| (a + b) / two)
    }

    /// Element-wise Richardson extrapolation `2·self - coarse`.
    ///
    /// A Greek is present only if both inputs carry it. When `coarse`
    /// equals `self` the result equals `self`.
    pub fn extrapolate(&self, coarse: &Self) -> Self {
        self.combine(coarse, |fine, coarse| fine + fine - coarse)
    }

    fn combine<F>(&self, other: &Self, f: F) -> Self
    where
        F: Fn(T, T) -> T,
    {
        let pair = |a: Option<T>, b: Option<T>| Some(f(a?, b?));
        Self {
            price: f(self.price, other.price),
            delta: pair(self.delta, other.delta),
            gamma: pair(self.gamma, other.gamma),
            theta: pair(self.theta, other.theta),
        }
    }
}
