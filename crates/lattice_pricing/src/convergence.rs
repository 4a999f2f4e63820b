//! Convergence of lattice prices in the step count.
//!
//! A [`ConvergenceStudy`] prices one contract over a list of step counts and
//! reports each lattice value next to the closed-form European price. Step
//! counts are independent, so with the `parallel` feature they run on the
//! rayon pool.

use lattice_models::analytical::{BsmPricer, ClosedFormPricer};
use lattice_models::instruments::OptionContract;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::config::{LatticeConfig, LatticeMethod};
use crate::error::LatticeError;
use crate::greeks::LatticeResult;
use crate::pricer::LatticePricer;

/// One row of a convergence study.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergencePoint {
    /// Lattice step count.
    pub steps: usize,
    /// Lattice result at this step count.
    pub result: LatticeResult<f64>,
    /// Lattice price minus the closed-form price, when one exists.
    pub error: Option<f64>,
}

/// Output of [`ConvergenceStudy::run`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergenceReport {
    /// Estimator that produced the rows.
    pub method: LatticeMethod,
    /// Closed-form price (European styles only).
    pub reference: Option<f64>,
    /// Rows in the order the step counts were given.
    pub points: Vec<ConvergencePoint>,
}

impl ConvergenceReport {
    /// Largest absolute pricing error over all rows.
    pub fn max_abs_error(&self) -> Option<f64> {
        self.points
            .iter()
            .filter_map(|point| point.error.map(f64::abs))
            .reduce(f64::max)
    }

    /// Row for `steps`, if it was part of the study.
    pub fn point(&self, steps: usize) -> Option<&ConvergencePoint> {
        self.points.iter().find(|point| point.steps == steps)
    }
}

/// Prices a contract across step counts with a fixed estimator.
///
/// # Examples
///
/// ```rust
/// use lattice_models::instruments::{OptionContract, OptionType};
/// use lattice_pricing::{ConvergenceStudy, LatticeMethod};
///
/// let put = OptionContract::builder()
///     .spot(41.0_f64)
///     .strike(40.0)
///     .maturity(1.0)
///     .dividend_yield(0.01)
///     .volatility(0.3)
///     .option_type(OptionType::Put)
///     .build()
///     .unwrap();
///
/// let report = ConvergenceStudy::new(LatticeMethod::Plain, 0.03)
///     .run(&put, &[10, 1000])
///     .unwrap();
///
/// let coarse = report.point(10).unwrap().error.unwrap().abs();
/// let fine = report.point(1000).unwrap().error.unwrap().abs();
/// assert!(fine < coarse);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ConvergenceStudy {
    method: LatticeMethod,
    rate: f64,
    greeks: bool,
}

impl ConvergenceStudy {
    /// Study of `method` under the risk-free `rate`, without Greeks.
    pub fn new(method: LatticeMethod, rate: f64) -> Self {
        Self {
            method,
            rate,
            greeks: false,
        }
    }

    /// Also extracts Greeks at each step count.
    pub fn with_greeks(mut self, greeks: bool) -> Self {
        self.greeks = greeks;
        self
    }

    /// Runs the study.
    ///
    /// # Errors
    /// The first error raised by any step count; no partial report is
    /// returned.
    pub fn run(
        &self,
        contract: &OptionContract<f64>,
        steps: &[usize],
    ) -> Result<ConvergenceReport, LatticeError> {
        let reference = if contract.style().is_european() {
            BsmPricer.price(contract, self.rate).ok()
        } else {
            None
        };

        #[cfg(feature = "parallel")]
        let points = steps
            .par_iter()
            .map(|&n| self.point(contract, n, reference))
            .collect::<Result<Vec<_>, _>>()?;
        #[cfg(not(feature = "parallel"))]
        let points = steps
            .iter()
            .map(|&n| self.point(contract, n, reference))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            method = %self.method,
            points = points.len(),
            reference,
            "convergence study complete"
        );

        Ok(ConvergenceReport {
            method: self.method,
            reference,
            points,
        })
    }

    fn point(
        &self,
        contract: &OptionContract<f64>,
        steps: usize,
        reference: Option<f64>,
    ) -> Result<ConvergencePoint, LatticeError> {
        let config = LatticeConfig::builder()
            .steps(steps)
            .rate(self.rate)
            .method(self.method)
            .greeks(self.greeks)
            .build()?;
        let result = LatticePricer::new(config).price(contract)?;

        Ok(ConvergencePoint {
            steps,
            error: reference.map(|value| result.price - value),
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_models::instruments::{ExerciseKind, OptionType};

    fn put(exercise: ExerciseKind) -> OptionContract<f64> {
        OptionContract::builder()
            .spot(41.0)
            .strike(40.0)
            .maturity(1.0)
            .dividend_yield(0.01)
            .volatility(0.3)
            .option_type(OptionType::Put)
            .exercise(exercise)
            .build()
            .unwrap()
    }

    #[test]
    fn test_rows_keep_input_order() {
        let steps = [200, 10, 50];
        let report = ConvergenceStudy::new(LatticeMethod::Plain, 0.03)
            .run(&put(ExerciseKind::European), &steps)
            .unwrap();
        let order: Vec<usize> = report.points.iter().map(|p| p.steps).collect();
        assert_eq!(order, steps);
    }

    #[test]
    fn test_errors_shrink_overall() {
        // Convergence is oscillatory, not monotone: compare ends only
        let report = ConvergenceStudy::new(LatticeMethod::Plain, 0.03)
            .run(&put(ExerciseKind::European), &[10, 200, 1000])
            .unwrap();
        let err = |n| report.point(n).unwrap().error.unwrap().abs();
        assert!(err(200) < err(10));
        assert!(err(1000) < err(10));
        assert!(report.max_abs_error().unwrap() >= err(1000));
    }

    #[test]
    fn test_accelerated_methods_beat_plain() {
        let contract = put(ExerciseKind::European);
        let plain = ConvergenceStudy::new(LatticeMethod::Plain, 0.03)
            .run(&contract, &[50])
            .unwrap();
        let richardson = ConvergenceStudy::new(LatticeMethod::Richardson, 0.03)
            .run(&contract, &[50])
            .unwrap();
        assert!(richardson.max_abs_error().unwrap() < plain.max_abs_error().unwrap());
    }

    #[test]
    fn test_american_has_no_reference() {
        let report = ConvergenceStudy::new(LatticeMethod::Averaged, 0.03)
            .with_greeks(true)
            .run(&put(ExerciseKind::American), &[20, 40])
            .unwrap();
        assert_eq!(report.reference, None);
        assert_eq!(report.max_abs_error(), None);
        assert!(report.points.iter().all(|p| p.result.has_greeks()));
    }

    #[test]
    fn test_first_error_aborts_study() {
        let result = ConvergenceStudy::new(LatticeMethod::Richardson, 0.03)
            .run(&put(ExerciseKind::European), &[10, 1, 20]);
        assert!(matches!(
            result,
            Err(LatticeError::InsufficientSteps { .. })
        ));
    }
}
