//! Lattice Greeks.
//!
//! - [`LatticeResult`]: price with optional Delta, Gamma, Theta
//! - [`GreekStencil`]: depth-2 / depth-1 snapshots and the finite-difference
//!   formulas applied to them

pub mod result;
pub mod stencil;

pub use result::LatticeResult;
pub use stencil::GreekStencil;
