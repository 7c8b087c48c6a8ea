//! Cost-efficiency sweeps: re-solve a market while one firm's marginal cost
//! varies. Solves are pure functions of their config, so sweep points run in
//! parallel with no coordination; each point owns its own config.

use crate::config::MarketConfig;
use crate::cournot::CournotSolver;
use crate::SolveError;
use rayon::prelude::*;
use serde::Serialize;

/// One solved sweep point.
#[derive(Debug, Clone, Serialize)]
pub struct SweepRow {
    /// The swept firm's marginal cost at this point.
    pub cost: f64,
    pub quantities: Vec<f64>,
    pub price: f64,
    pub profits: Vec<f64>,
}

/// Sweep of one firm's marginal cost over an inclusive linear range.
#[derive(Debug, Clone)]
pub struct CostSweep {
    /// Index of the firm whose cost varies.
    pub firm: usize,
    pub from: f64,
    pub to: f64,
    pub steps: usize,
}

impl CostSweep {
    /// The swept cost values (inclusive linspace).
    pub fn costs(&self) -> Vec<f64> {
        if self.steps <= 1 {
            return vec![self.from];
        }
        let step = (self.to - self.from) / (self.steps - 1) as f64;
        (0..self.steps)
            .map(|i| self.from + step * i as f64)
            .collect()
    }

    /// Solve the Cournot equilibrium at every swept cost, in parallel.
    /// The first failing point aborts the sweep.
    pub fn run(
        &self,
        base: &MarketConfig,
        solver: &CournotSolver,
    ) -> Result<Vec<SweepRow>, SolveError> {
        if self.firm >= base.n() {
            return Err(SolveError::InvalidConfiguration(format!(
                "swept firm {} out of range for {} firms",
                self.firm,
                base.n()
            )));
        }
        self.costs()
            .into_par_iter()
            .map(|cost| {
                let mut config = base.clone();
                config.cost_params[self.firm] = cost;
                config.validate()?;
                let result = solver.solve(&config)?;
                Ok(SweepRow {
                    cost,
                    quantities: result.quantities,
                    price: result.price,
                    profits: result.profits,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn costs_form_an_inclusive_linspace() {
        let sweep = CostSweep {
            firm: 0,
            from: 1.0,
            to: 5.0,
            steps: 5,
        };
        assert_eq!(sweep.costs(), vec![1.0, 2.0, 3.0, 4.0, 5.0]);

        let single = CostSweep {
            firm: 0,
            from: 2.0,
            to: 9.0,
            steps: 1,
        };
        assert_eq!(single.costs(), vec![2.0]);
    }

    #[test]
    fn rising_cost_shrinks_quantity_and_never_raises_profit() {
        let base = MarketConfig::baseline();
        let sweep = CostSweep {
            firm: 0,
            from: 0.1,
            to: 5.0,
            steps: 30,
        };
        let rows = sweep.run(&base, &CournotSolver::default()).unwrap();
        assert_eq!(rows.len(), 30);

        for pair in rows.windows(2) {
            assert!(
                pair[1].quantities[0] < pair[0].quantities[0],
                "swept firm's quantity must fall as its cost rises"
            );
            assert!(
                pair[1].profits[0] <= pair[0].profits[0] + 1e-6,
                "swept firm's profit must not rise with its cost"
            );
            // The rival gains what the swept firm loses
            assert!(pair[1].quantities[1] > pair[0].quantities[1]);
        }
    }

    #[test]
    fn out_of_range_firm_is_rejected() {
        let sweep = CostSweep {
            firm: 7,
            from: 0.1,
            to: 5.0,
            steps: 10,
        };
        assert!(matches!(
            sweep.run(&MarketConfig::baseline(), &CournotSolver::default()),
            Err(SolveError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn negative_swept_cost_fails_validation() {
        let sweep = CostSweep {
            firm: 0,
            from: -1.0,
            to: 1.0,
            steps: 3,
        };
        assert!(sweep
            .run(&MarketConfig::baseline(), &CournotSolver::default())
            .is_err());
    }
}
