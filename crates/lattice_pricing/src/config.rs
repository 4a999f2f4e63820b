//! Lattice pricing configuration.
//!
//! This module provides [`LatticeConfig`], an immutable description of one
//! pricing request (step count, rate, estimator, Greeks flag), and its
//! builder.

use std::fmt;
use std::str::FromStr;

use crate::error::LatticeError;

/// Maximum number of lattice steps allowed.
pub const MAX_STEPS: usize = 100_000;

/// Lattice estimator.
///
/// - `Plain`: one backward induction pass
/// - `Averaged`: mean of the N and N+1 step passes
/// - `Hybrid`: closed-form values on the layer before expiry
/// - `Richardson`: 2·hybrid(N) - hybrid(⌊N/2⌋)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LatticeMethod {
    /// Plain binomial lattice.
    #[default]
    Plain,
    /// Average of adjacent step counts.
    Averaged,
    /// Closed-form terminal substitution.
    Hybrid,
    /// Richardson extrapolation of the hybrid lattice.
    Richardson,
}

impl LatticeMethod {
    /// All methods, in increasing order of sophistication.
    pub const ALL: [LatticeMethod; 4] = [
        LatticeMethod::Plain,
        LatticeMethod::Averaged,
        LatticeMethod::Hybrid,
        LatticeMethod::Richardson,
    ];

    /// Smallest step count this method accepts.
    ///
    /// The Greek stencil reads the layers at depth 2 and 1, which the hybrid
    /// lattice only has from N = 3 on. Richardson halves N, so its limits
    /// double.
    pub fn min_steps(&self, with_greeks: bool) -> usize {
        match (self, with_greeks) {
            (LatticeMethod::Plain | LatticeMethod::Averaged, false) => 1,
            (LatticeMethod::Plain | LatticeMethod::Averaged, true) => 2,
            (LatticeMethod::Hybrid, false) => 1,
            (LatticeMethod::Hybrid, true) => 3,
            (LatticeMethod::Richardson, false) => 2,
            (LatticeMethod::Richardson, true) => 6,
        }
    }

    /// Returns the method name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            LatticeMethod::Plain => "Plain",
            LatticeMethod::Averaged => "Averaged",
            LatticeMethod::Hybrid => "Hybrid",
            LatticeMethod::Richardson => "Richardson",
        }
    }
}

impl fmt::Display for LatticeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            LatticeMethod::Plain => "plain",
            LatticeMethod::Averaged => "averaged",
            LatticeMethod::Hybrid => "hybrid",
            LatticeMethod::Richardson => "richardson",
        };
        f.pad(tag)
    }
}

impl FromStr for LatticeMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "binomial" => Ok(LatticeMethod::Plain),
            "averaged" | "average" => Ok(LatticeMethod::Averaged),
            "hybrid" | "bbs" => Ok(LatticeMethod::Hybrid),
            "richardson" | "bbsr" => Ok(LatticeMethod::Richardson),
            _ => Err(format!(
                "Unknown lattice method '{}': expected plain, averaged, hybrid or richardson",
                s
            )),
        }
    }
}

/// Lattice pricing configuration.
///
/// Immutable; use [`LatticeConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use lattice_pricing::{LatticeConfig, LatticeMethod};
///
/// let config = LatticeConfig::builder()
///     .steps(200)
///     .rate(0.03)
///     .method(LatticeMethod::Richardson)
///     .greeks(true)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.steps(), 200);
/// assert!(config.greeks());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeConfig {
    /// Number of lattice steps (N).
    steps: usize,
    /// Continuously compounded risk-free rate (r).
    rate: f64,
    /// Estimator to run.
    method: LatticeMethod,
    /// Whether Delta, Gamma and Theta are extracted.
    greeks: bool,
}

impl LatticeConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> LatticeConfigBuilder {
        LatticeConfigBuilder::default()
    }

    /// Returns the number of lattice steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the estimator.
    #[inline]
    pub fn method(&self) -> LatticeMethod {
        self.method
    }

    /// Returns whether Greeks are requested.
    #[inline]
    pub fn greeks(&self) -> bool {
        self.greeks
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// - `InvalidStepCount` if `steps` is 0 or greater than [`MAX_STEPS`]
    /// - `InvalidRate` if `rate` is not finite
    /// - `InsufficientSteps` if the method cannot run at `steps` (with or
    ///   without Greeks, see [`LatticeMethod::min_steps`])
    pub fn validate(&self) -> Result<(), LatticeError> {
        if self.steps == 0 || self.steps > MAX_STEPS {
            return Err(LatticeError::InvalidStepCount { steps: self.steps });
        }
        if !self.rate.is_finite() {
            return Err(LatticeError::InvalidRate { rate: self.rate });
        }
        let required = self.method.min_steps(self.greeks);
        if self.steps < required {
            return Err(LatticeError::InsufficientSteps {
                operation: operation_name(self.method, self.greeks),
                required,
                actual: self.steps,
            });
        }
        Ok(())
    }
}

/// Operation label used in `InsufficientSteps` errors.
pub(crate) fn operation_name(method: LatticeMethod, with_greeks: bool) -> &'static str {
    match (method, with_greeks) {
        (LatticeMethod::Plain, true) => "binomial Greeks",
        (LatticeMethod::Averaged, true) => "averaged Greeks",
        (LatticeMethod::Hybrid, true) => "hybrid Greeks",
        (LatticeMethod::Richardson, true) => "Richardson Greeks",
        (LatticeMethod::Richardson, false) => "Richardson extrapolation",
        (_, false) => "lattice pricing",
    }
}

/// Builder for [`LatticeConfig`].
///
/// The step count is required; the rate defaults to zero, the method to
/// [`LatticeMethod::Plain`] and Greeks to off.
#[derive(Clone, Debug, Default)]
pub struct LatticeConfigBuilder {
    steps: Option<usize>,
    rate: f64,
    method: LatticeMethod,
    greeks: bool,
}

impl LatticeConfigBuilder {
    /// Sets the number of lattice steps.
    ///
    /// # Arguments
    ///
    /// * `steps` - Number of steps in [1, 100_000]
    #[inline]
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Sets the risk-free rate.
    #[inline]
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Sets the estimator.
    #[inline]
    pub fn method(mut self, method: LatticeMethod) -> Self {
        self.method = method;
        self
    }

    /// Requests (or not) Greek extraction.
    #[inline]
    pub fn greeks(mut self, greeks: bool) -> Self {
        self.greeks = greeks;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStepCount { steps: 0 }` when no step count was set,
    /// otherwise whatever [`LatticeConfig::validate`] reports.
    pub fn build(self) -> Result<LatticeConfig, LatticeError> {
        let config = LatticeConfig {
            steps: self.steps.unwrap_or(0),
            rate: self.rate,
            method: self.method,
            greeks: self.greeks,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = LatticeConfig::builder().steps(5).build().unwrap();
        assert_eq!(config.steps(), 5);
        assert_eq!(config.rate(), 0.0);
        assert_eq!(config.method(), LatticeMethod::Plain);
        assert!(!config.greeks());
    }

    #[test]
    fn test_missing_steps() {
        let result = LatticeConfig::builder().rate(0.03).build();
        assert_eq!(result, Err(LatticeError::InvalidStepCount { steps: 0 }));
    }

    #[test]
    fn test_step_bounds() {
        assert!(LatticeConfig::builder().steps(MAX_STEPS).build().is_ok());
        assert!(matches!(
            LatticeConfig::builder().steps(MAX_STEPS + 1).build(),
            Err(LatticeError::InvalidStepCount { .. })
        ));
    }

    #[test]
    fn test_rate_must_be_finite() {
        let result = LatticeConfig::builder().steps(10).rate(f64::NAN).build();
        assert!(matches!(result, Err(LatticeError::InvalidRate { .. })));
    }

    #[test]
    fn test_greek_minimums() {
        let cases = [
            (LatticeMethod::Plain, 2),
            (LatticeMethod::Averaged, 2),
            (LatticeMethod::Hybrid, 3),
            (LatticeMethod::Richardson, 6),
        ];
        for (method, required) in cases {
            let ok = LatticeConfig::builder()
                .steps(required)
                .method(method)
                .greeks(true)
                .build();
            assert!(ok.is_ok(), "{method} should accept {required} steps");

            let err = LatticeConfig::builder()
                .steps(required - 1)
                .method(method)
                .greeks(true)
                .build()
                .unwrap_err();
            assert_eq!(
                err,
                LatticeError::InsufficientSteps {
                    operation: operation_name(method, true),
                    required,
                    actual: required - 1,
                }
            );
        }
    }

    #[test]
    fn test_richardson_needs_two_steps_without_greeks() {
        let err = LatticeConfig::builder()
            .steps(1)
            .method(LatticeMethod::Richardson)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("Richardson extrapolation"));
        assert!(LatticeConfig::builder()
            .steps(1)
            .method(LatticeMethod::Hybrid)
            .build()
            .is_ok());
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("plain".parse::<LatticeMethod>(), Ok(LatticeMethod::Plain));
        assert_eq!("BBSR".parse::<LatticeMethod>(), Ok(LatticeMethod::Richardson));
        assert_eq!("bbs".parse::<LatticeMethod>(), Ok(LatticeMethod::Hybrid));
        assert!("trinomial".parse::<LatticeMethod>().is_err());
        for method in LatticeMethod::ALL {
            assert_eq!(method.to_string().parse::<LatticeMethod>(), Ok(method));
        }
    }
}
