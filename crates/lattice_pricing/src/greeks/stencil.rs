//! Finite-difference Greeks from the two layers nearest the root.

use num_traits::Float;

use super::result::LatticeResult;
use crate::error::LatticeError;
use crate::lattice::{LatticeLayer, LatticeParams};

/// Snapshots of the depth-2 and depth-1 layers taken during a sweep.
///
/// Call [`GreekStencil::capture`] after every layer change (including the
/// starting layer) and [`GreekStencil::extract`] once the root is reached.
#[derive(Debug, Clone)]
pub struct GreekStencil<T: Float> {
    depth_two: Option<[T; 3]>,
    depth_one: Option<[T; 2]>,
}

impl<T: Float> GreekStencil<T> {
    /// Empty stencil.
    pub fn new() -> Self {
        Self {
            depth_two: None,
            depth_one: None,
        }
    }

    /// Records the layer's values if it sits at depth 2 or 1.
    pub fn capture(&mut self, layer: &LatticeLayer<T>) {
        match *layer.values() {
            [a, b, c] => self.depth_two = Some([a, b, c]),
            [a, b] => self.depth_one = Some([a, b]),
            _ => {}
        }
    }

    /// Returns true once both snapshots are recorded.
    pub fn is_complete(&self) -> bool {
        self.depth_two.is_some() && self.depth_one.is_some()
    }

    /// Delta, Gamma and Theta around the root.
    ///
    /// - Delta = (V₁₀ - V₁₁) / (S₁₀ - S₁₁)
    /// - Gamma = [(V₂₀ - V₂₁)/(S₂₀ - S₂₁) - (V₂₁ - V₂₂)/(S₂₁ - S₂₂)] / ((S₂₀ - S₂₂)/2)
    /// - Theta = (V₂₁ - V₀) / (2·dt)
    ///
    /// where S_ji = S0·u^(j-i)·d^i.
    ///
    /// # Errors
    /// - `InsufficientSteps` if either snapshot is missing
    /// - `NonFinite` if a price spread vanishes and a Greek is not finite
    pub fn extract(
        &self,
        spot: T,
        root: T,
        params: &LatticeParams<T>,
        operation: &'static str,
        required: usize,
    ) -> Result<LatticeResult<T>, LatticeError> {
        let (v2, v1) = match (self.depth_two, self.depth_one) {
            (Some(v2), Some(v1)) => (v2, v1),
            _ => {
                return Err(LatticeError::InsufficientSteps {
                    operation,
                    required,
                    actual: params.steps(),
                })
            }
        };

        let s2 = [0, 1, 2].map(|node| params.node_spot(spot, 2, node));
        let s1 = [0, 1].map(|node| params.node_spot(spot, 1, node));
        let two = T::one() + T::one();

        let delta = (v1[0] - v1[1]) / (s1[0] - s1[1]);
        let upper = (v2[0] - v2[1]) / (s2[0] - s2[1]);
        let lower = (v2[1] - v2[2]) / (s2[1] - s2[2]);
        let gamma = (upper - lower) / ((s2[0] - s2[2]) / two);
        let theta = (v2[1] - root) / (params.dt() + params.dt());

        finite(delta, "delta")?;
        finite(gamma, "gamma")?;
        finite(theta, "theta")?;
        Ok(LatticeResult::with_greeks(root, delta, gamma, theta))
    }
}

impl<T: Float> Default for GreekStencil<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn finite<T: Float>(value: T, quantity: &'static str) -> Result<(), LatticeError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(LatticeError::NonFinite { quantity })
    }
}
