//! Lattice geometry and layer storage.
//!
//! - [`LatticeParams`]: step count, u, d, p derived from a contract
//! - [`LatticeLayer`]: reusable value buffer and the backward induction step

pub mod layer;
pub mod params;

pub use layer::LatticeLayer;
pub use params::LatticeParams;
