//! Lattice layer buffer and the backward induction step.

use lattice_models::instruments::{OptionContract, Payoff};
use num_traits::Float;

use super::params::LatticeParams;

/// Option values across one layer of the lattice.
///
/// The buffer is allocated once at the widest layer and reused in place as
/// the sweep walks back towards the root. At depth `j` only indices `0..=j`
/// are meaningful; trailing entries are stale and never read.
///
/// Node `i` of layer `j` sits at S0·u^(j-i)·d^i, so prices strictly
/// decrease with the node index.
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeLayer<T: Float> {
    depth: usize,
    spot: T,
    values: Vec<T>,
}

impl<T: Float> LatticeLayer<T> {
    /// Terminal layer (depth N) seeded from the payoff.
    ///
    /// Prices are generated by starting at the all-up node S0·u^N and
    /// multiplying by d/u for each node below it.
    pub fn terminal<P: Payoff<T>>(spot: T, params: &LatticeParams<T>, payoff: &P) -> Self {
        let depth = params.steps();
        let values = walk_down(spot, depth, params)
            .map(|node_spot| payoff.payoff(node_spot))
            .collect();
        Self {
            depth,
            spot,
            values,
        }
    }

    /// Layer at `depth` whose node values come from `value_at(node_spot)`.
    ///
    /// Prices are generated with the same multiplicative walk as
    /// [`LatticeLayer::terminal`]. The first error returned by `value_at`
    /// aborts construction.
    pub fn from_fn<E, F>(
        spot: T,
        depth: usize,
        params: &LatticeParams<T>,
        value_at: F,
    ) -> Result<Self, E>
    where
        F: FnMut(T) -> Result<T, E>,
    {
        let values = walk_down(spot, depth, params)
            .map(value_at)
            .collect::<Result<Vec<T>, E>>()?;
        Ok(Self {
            depth,
            spot,
            values,
        })
    }

    /// Current depth.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Valid option values at the current depth (`depth + 1` entries).
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values[..=self.depth]
    }

    /// Underlying prices at the current depth, from the closed form.
    pub fn prices(&self, params: &LatticeParams<T>) -> Vec<T> {
        (0..=self.depth)
            .map(|node| params.node_spot(self.spot, self.depth, node))
            .collect()
    }

    /// Root value. Only meaningful once the sweep has reached depth 0.
    #[inline]
    pub fn root(&self) -> T {
        self.values[0]
    }

    /// Rolls the layer back one step, applying the exercise rule.
    ///
    /// Nodes are processed in increasing index so that `values[i + 1]`
    /// still holds the child layer's value when node `i` is overwritten.
    /// Does nothing at depth 0.
    pub fn step_back(&mut self, contract: &OptionContract<T>, params: &LatticeParams<T>) {
        if self.depth == 0 {
            return;
        }
        let depth = self.depth - 1;
        let discount = params.discount();
        let p = params.prob();
        let q = T::one() - p;
        let style = contract.style();

        if style.needs_node_spot() {
            for i in 0..=depth {
                let continuation = discount * (p * self.values[i] + q * self.values[i + 1]);
                let node_spot = params.node_spot(self.spot, depth, i);
                let intrinsic = contract.intrinsic(node_spot);
                self.values[i] = style.settle(continuation, intrinsic, node_spot);
            }
        } else {
            for i in 0..=depth {
                self.values[i] = discount * (p * self.values[i] + q * self.values[i + 1]);
            }
        }
        self.depth = depth;
    }
}

/// Node prices of a layer, top to bottom, by successive multiplication.
fn walk_down<T: Float>(
    spot: T,
    depth: usize,
    params: &LatticeParams<T>,
) -> impl Iterator<Item = T> {
    let ratio = params.down() / params.up();
    let top = params.up().powi(depth as i32) * spot;
    std::iter::successors(Some(top), move |&price| Some(price * ratio)).take(depth + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lattice_models::instruments::{ExerciseKind, OptionType};

    fn put(exercise: ExerciseKind) -> OptionContract<f64> {
        let builder = OptionContract::builder()
            .spot(41.0)
            .strike(40.0)
            .maturity(1.0)
            .dividend_yield(0.01)
            .volatility(0.3)
            .option_type(OptionType::Put)
            .exercise(exercise);
        match exercise {
            ExerciseKind::DownAndOut => builder.barrier(35.0).build().unwrap(),
            _ => builder.build().unwrap(),
        }
    }

    #[test]
    fn test_terminal_layer_shape() {
        let contract = put(ExerciseKind::European);
        let params = LatticeParams::new(5, 0.03, &contract).unwrap();
        let layer = LatticeLayer::terminal(41.0, &params, &contract);

        assert_eq!(layer.depth(), 5);
        assert_eq!(layer.values().len(), 6);

        let prices = layer.prices(&params);
        assert!(prices.windows(2).all(|w| w[0] > w[1]));
        for (price, value) in prices.iter().zip(layer.values()) {
            assert_relative_eq!(*value, (40.0 - price).max(0.0), epsilon = 1e-10);
        }
    }

    #[test]
    fn test_walk_matches_closed_form() {
        let contract = put(ExerciseKind::European);
        let params = LatticeParams::new(200, 0.03, &contract).unwrap();
        for (node, price) in walk_down(41.0, 200, &params).enumerate() {
            assert_relative_eq!(
                price,
                params.node_spot(41.0, 200, node),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_step_back_european_one_step() {
        let contract = put(ExerciseKind::European);
        let params = LatticeParams::new(1, 0.03, &contract).unwrap();
        let mut layer = LatticeLayer::terminal(41.0, &params, &contract);
        let (up, down) = (layer.values()[0], layer.values()[1]);

        layer.step_back(&contract, &params);
        assert_eq!(layer.depth(), 0);
        let expected = params.discount() * (params.prob() * up + (1.0 - params.prob()) * down);
        assert_relative_eq!(layer.root(), expected, epsilon = 1e-14);

        // Further steps are no-ops
        layer.step_back(&contract, &params);
        assert_eq!(layer.depth(), 0);
    }

    #[test]
    fn test_step_back_american_never_below_intrinsic() {
        let contract = put(ExerciseKind::American);
        let params = LatticeParams::new(8, 0.03, &contract).unwrap();
        let mut layer = LatticeLayer::terminal(41.0, &params, &contract);
        while layer.depth() > 0 {
            layer.step_back(&contract, &params);
            for (price, value) in layer.prices(&params).iter().zip(layer.values()) {
                assert!(*value >= 40.0 - price - 1e-12);
            }
        }
    }

    #[test]
    fn test_step_back_knocks_out_at_or_below_barrier() {
        let contract = put(ExerciseKind::DownAndOut);
        let params = LatticeParams::new(20, 0.03, &contract).unwrap();
        let mut layer = LatticeLayer::terminal(41.0, &params, &contract);
        while layer.depth() > 0 {
            layer.step_back(&contract, &params);
            for (price, value) in layer.prices(&params).iter().zip(layer.values()) {
                if *price <= 35.0 {
                    assert_eq!(*value, 0.0);
                }
            }
        }
    }

    #[test]
    fn test_from_fn_propagates_errors() {
        let contract = put(ExerciseKind::European);
        let params = LatticeParams::new(4, 0.03, &contract).unwrap();
        let result: Result<LatticeLayer<f64>, &str> = LatticeLayer::from_fn(41.0, 3, &params, |s| {
            if s < 40.0 {
                Err("low")
            } else {
                Ok(s)
            }
        });
        assert_eq!(result, Err("low"));

        let layer: LatticeLayer<f64> =
            LatticeLayer::from_fn(41.0, 3, &params, |s| Ok::<f64, ()>(s)).unwrap();
        assert_eq!(layer.values().len(), 4);
        assert_relative_eq!(layer.values()[0], 41.0 * params.up().powi(3), epsilon = 1e-12);
    }
}
