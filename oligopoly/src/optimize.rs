//! Bounded derivative-free minimization.
//!
//! Golden-section search over a closed interval, plus a cyclic
//! coordinate-descent wrapper for box-constrained vectors. The profit
//! objectives here are piecewise quadratic (zero-price and zero-quantity
//! clamps), so bracketing needs no gradients and tolerates the kinks.

use crate::SolveError;

// (sqrt(5) - 1) / 2
const INV_PHI: f64 = 0.618_033_988_749_894_8;

/// Iteration budget and stopping tolerance for the bounded searches.
#[derive(Debug, Clone)]
pub struct BoundedMinimizer {
    /// Bracket width (scalar search) and objective-decrease (vector search)
    /// tolerance.
    pub tolerance: f64,
    /// Cap on golden-section steps per scalar search.
    pub max_iterations: usize,
    /// Cap on full coordinate sweeps in the vector search. Generous: on a
    /// profit ridge the sweep drifts toward a corner at a rate set by the
    /// cost gap between members, a few units per sweep.
    pub max_sweeps: usize,
}

impl Default for BoundedMinimizer {
    fn default() -> Self {
        BoundedMinimizer {
            tolerance: 1e-6,
            max_iterations: 200,
            max_sweeps: 5_000,
        }
    }
}

impl BoundedMinimizer {
    /// Minimize `f` over `[lo, hi]` by golden-section search, returning the
    /// bracket midpoint once the bracket is narrower than the tolerance.
    pub fn minimize_scalar<F>(&self, f: F, lo: f64, hi: f64) -> Result<f64, SolveError>
    where
        F: Fn(f64) -> f64,
    {
        if !(lo < hi) || !lo.is_finite() || !hi.is_finite() {
            return Err(SolveError::InvalidConfiguration(format!(
                "search interval must satisfy lo < hi, got ({}, {})",
                lo, hi
            )));
        }

        let (mut a, mut b) = (lo, hi);
        let mut c = b - INV_PHI * (b - a);
        let mut d = a + INV_PHI * (b - a);
        let mut fc = f(c);
        let mut fd = f(d);

        for _ in 0..self.max_iterations {
            if b - a <= self.tolerance {
                return Ok(0.5 * (a + b));
            }
            if fc < fd {
                b = d;
                d = c;
                fd = fc;
                c = b - INV_PHI * (b - a);
                fc = f(c);
            } else {
                a = c;
                c = d;
                fc = fd;
                d = a + INV_PHI * (b - a);
                fd = f(d);
            }
        }
        Err(SolveError::DidNotConverge {
            iterations: self.max_iterations,
        })
    }

    /// Minimize `f` over the box `bounds` by cyclic coordinate descent, each
    /// coordinate solved by golden-section search. Stops when a full sweep no
    /// longer improves the objective by more than the tolerance.
    pub fn minimize<F>(
        &self,
        f: F,
        start: &[f64],
        bounds: &[(f64, f64)],
    ) -> Result<Vec<f64>, SolveError>
    where
        F: Fn(&[f64]) -> f64,
    {
        if start.len() != bounds.len() || start.is_empty() {
            return Err(SolveError::InvalidConfiguration(format!(
                "start point ({}) and bounds ({}) must be non-empty and equal length",
                start.len(),
                bounds.len()
            )));
        }

        let mut point: Vec<f64> = start
            .iter()
            .zip(bounds)
            .map(|(&x, &(lo, hi))| x.clamp(lo, hi))
            .collect();
        let mut value = f(&point);

        for _ in 0..self.max_sweeps {
            for i in 0..point.len() {
                let (lo, hi) = bounds[i];
                let best = self.minimize_scalar(
                    |x| {
                        let mut candidate = point.clone();
                        candidate[i] = x;
                        f(&candidate)
                    },
                    lo,
                    hi,
                )?;
                point[i] = best;
            }
            let next_value = f(&point);
            if value - next_value <= self.tolerance {
                return Ok(point);
            }
            value = next_value;
        }
        Err(SolveError::DidNotConverge {
            iterations: self.max_sweeps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn scalar_search_finds_an_interior_minimum() {
        let minimizer = BoundedMinimizer::default();
        let x = minimizer
            .minimize_scalar(|x| (x - 2.0) * (x - 2.0), 0.0, 10.0)
            .unwrap();
        assert_abs_diff_eq!(x, 2.0, epsilon = 1e-4);
    }

    #[test]
    fn scalar_search_lands_on_the_boundary_when_it_binds() {
        let minimizer = BoundedMinimizer::default();
        let x = minimizer.minimize_scalar(|x| x * x, 1.0, 5.0).unwrap();
        assert_abs_diff_eq!(x, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn scalar_search_rejects_an_empty_interval() {
        let minimizer = BoundedMinimizer::default();
        assert!(matches!(
            minimizer.minimize_scalar(|x| x, 5.0, 5.0),
            Err(SolveError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn scalar_search_reports_an_exhausted_budget() {
        let minimizer = BoundedMinimizer {
            tolerance: 1e-12,
            max_iterations: 3,
            max_sweeps: 200,
        };
        let err = minimizer
            .minimize_scalar(|x| (x - 2.0) * (x - 2.0), 0.0, 10.0)
            .unwrap_err();
        assert_eq!(err, SolveError::DidNotConverge { iterations: 3 });
    }

    #[test]
    fn coordinate_descent_finds_a_separable_minimum() {
        let minimizer = BoundedMinimizer::default();
        let point = minimizer
            .minimize(
                |p| (p[0] - 1.0).powi(2) + (p[1] - 3.0).powi(2),
                &[0.0, 0.0],
                &[(0.0, 10.0), (0.0, 10.0)],
            )
            .unwrap();
        assert_abs_diff_eq!(point[0], 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(point[1], 3.0, epsilon = 1e-4);
    }

    #[test]
    fn coordinate_descent_respects_the_box() {
        let minimizer = BoundedMinimizer::default();
        // Unconstrained minimum at (-1, 12); box forces (0, 10)
        let point = minimizer
            .minimize(
                |p| (p[0] + 1.0).powi(2) + (p[1] - 12.0).powi(2),
                &[5.0, 5.0],
                &[(0.0, 10.0), (0.0, 10.0)],
            )
            .unwrap();
        assert_abs_diff_eq!(point[0], 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(point[1], 10.0, epsilon = 1e-4);
    }

    #[test]
    fn coordinate_descent_rejects_mismatched_inputs() {
        let minimizer = BoundedMinimizer::default();
        assert!(matches!(
            minimizer.minimize(|p| p[0], &[1.0, 2.0], &[(0.0, 1.0)]),
            Err(SolveError::InvalidConfiguration(_))
        ));
    }
}
