//! Option contract definitions.
//!
//! This module provides:
//! - [`OptionType`]: call/put flag with intrinsic and payoff evaluation
//! - [`ExerciseKind`] and [`ExerciseStyle`]: exercise style, with the barrier
//!   level carried by the down-and-out variant
//! - [`OptionContract`]: the immutable instrument description
//! - [`Payoff`]: terminal payoff seam consumed by the lattice builder
//! - [`InstrumentError`]: contract validation errors

pub mod contract;
pub mod error;
pub mod exercise;
pub mod payoff;

pub use contract::{OptionContract, OptionContractBuilder};
pub use error::InstrumentError;
pub use exercise::{ExerciseKind, ExerciseStyle};
pub use payoff::{OptionType, Payoff};
