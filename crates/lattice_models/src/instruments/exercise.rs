//! Option exercise style definitions.
//!
//! This module provides the exercise styles a lattice can value:
//! European, American, and down-and-out barrier.

use std::fmt;
use std::str::FromStr;

use num_traits::Float;

use super::error::InstrumentError;

/// Exercise style tag without parameters.
///
/// Used where a style is named before its parameters are known (builders,
/// configuration files, command-line flags).
///
/// # Examples
/// ```
/// use lattice_models::instruments::ExerciseKind;
///
/// let kind: ExerciseKind = "american".parse().unwrap();
/// assert_eq!(kind, ExerciseKind::American);
/// assert!(ExerciseKind::DownAndOut.requires_barrier());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ExerciseKind {
    /// Exercise only at expiry.
    #[default]
    European,
    /// Exercise at any lattice node.
    American,
    /// European exercise, extinguished at or below a barrier.
    DownAndOut,
}

impl ExerciseKind {
    /// Returns whether this style needs a barrier level.
    #[inline]
    pub fn requires_barrier(&self) -> bool {
        matches!(self, ExerciseKind::DownAndOut)
    }

    /// Returns the style name used in messages.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            ExerciseKind::European => "European",
            ExerciseKind::American => "American",
            ExerciseKind::DownAndOut => "DownAndOut",
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ExerciseKind::European => "european",
            ExerciseKind::American => "american",
            ExerciseKind::DownAndOut => "down-and-out",
        };
        write!(f, "{}", tag)
    }
}

impl FromStr for ExerciseKind {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "european" | "eu" => Ok(ExerciseKind::European),
            "american" | "am" => Ok(ExerciseKind::American),
            "down-and-out" | "down_and_out" | "dno" => Ok(ExerciseKind::DownAndOut),
            _ => Err(InstrumentError::ParseError {
                kind: "exercise style",
                value: s.to_string(),
            }),
        }
    }
}

/// Option exercise style.
///
/// A closed set of valuation rules applied at each interior lattice node.
/// The barrier level lives inside the down-and-out variant, so a barrier
/// style without a barrier cannot be represented.
///
/// # Type Parameters
/// * `T` - Floating-point type for the barrier level
///
/// # Examples
/// ```
/// use lattice_models::instruments::ExerciseStyle;
///
/// let american: ExerciseStyle<f64> = ExerciseStyle::American;
/// assert_eq!(american.settle(1.0, 2.5, 37.0), 2.5);
///
/// let barrier = ExerciseStyle::DownAndOut { barrier: 35.0 };
/// assert_eq!(barrier.settle(1.0, 2.5, 37.0), 1.0);
/// assert_eq!(barrier.settle(1.0, 2.5, 35.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExerciseStyle<T: Float> {
    /// Exercise only at expiry.
    European,

    /// Exercise at any node.
    American,

    /// Knocked out when the underlying is at or below the barrier.
    DownAndOut {
        /// Barrier level (B)
        barrier: T,
    },
}

impl<T: Float> ExerciseStyle<T> {
    /// Builds a style from its tag and an optional barrier level.
    ///
    /// # Errors
    /// - `MissingBarrier` if `kind` is down-and-out and no barrier is given
    /// - `UnexpectedBarrier` if a barrier is given for any other style
    /// - `InvalidBarrier` if the barrier is not strictly positive
    pub fn from_kind(kind: ExerciseKind, barrier: Option<T>) -> Result<Self, InstrumentError> {
        match (kind, barrier) {
            (ExerciseKind::European, None) => Ok(ExerciseStyle::European),
            (ExerciseKind::American, None) => Ok(ExerciseStyle::American),
            (ExerciseKind::DownAndOut, Some(barrier)) => {
                if !(barrier > T::zero()) || !barrier.is_finite() {
                    return Err(InstrumentError::InvalidBarrier {
                        barrier: barrier.to_f64().unwrap_or(f64::NAN),
                    });
                }
                Ok(ExerciseStyle::DownAndOut { barrier })
            }
            (ExerciseKind::DownAndOut, None) => Err(InstrumentError::MissingBarrier {
                style: kind.name(),
            }),
            (_, Some(_)) => Err(InstrumentError::UnexpectedBarrier { style: kind.name() }),
        }
    }

    /// Returns the parameterless tag of this style.
    #[inline]
    pub fn kind(&self) -> ExerciseKind {
        match self {
            ExerciseStyle::European => ExerciseKind::European,
            ExerciseStyle::American => ExerciseKind::American,
            ExerciseStyle::DownAndOut { .. } => ExerciseKind::DownAndOut,
        }
    }

    /// Returns the barrier level, if any.
    #[inline]
    pub fn barrier(&self) -> Option<T> {
        match self {
            ExerciseStyle::DownAndOut { barrier } => Some(*barrier),
            _ => None,
        }
    }

    /// Returns whether this is European exercise.
    #[inline]
    pub fn is_european(&self) -> bool {
        matches!(self, ExerciseStyle::European)
    }

    /// Returns whether this is American exercise.
    #[inline]
    pub fn is_american(&self) -> bool {
        matches!(self, ExerciseStyle::American)
    }

    /// Returns whether this is a down-and-out barrier.
    #[inline]
    pub fn is_barrier(&self) -> bool {
        matches!(self, ExerciseStyle::DownAndOut { .. })
    }

    /// Returns whether the node valuation needs the node's underlying price.
    ///
    /// European nodes are pure continuation, so callers can skip computing
    /// the spot at each node.
    #[inline]
    pub fn needs_node_spot(&self) -> bool {
        !self.is_european()
    }

    /// Node valuation rule.
    ///
    /// # Arguments
    /// * `continuation` - Discounted risk-neutral expectation of the children
    /// * `intrinsic` - Signed immediate exercise value at this node
    /// * `spot` - Underlying price at this node
    ///
    /// # Returns
    /// - European: `continuation`
    /// - American: `max(continuation, intrinsic)`
    /// - Down-and-out: `continuation` if `spot > barrier`, else zero. The
    ///   test is the same for calls and puts.
    #[inline]
    pub fn settle(&self, continuation: T, intrinsic: T, spot: T) -> T {
        match self {
            ExerciseStyle::European => continuation,
            ExerciseStyle::American => continuation.max(intrinsic),
            ExerciseStyle::DownAndOut { barrier } => {
                if spot > *barrier {
                    continuation
                } else {
                    T::zero()
                }
            }
        }
    }
}

impl<T: Float> Default for ExerciseStyle<T> {
    fn default() -> Self {
        ExerciseStyle::European
    }
}
