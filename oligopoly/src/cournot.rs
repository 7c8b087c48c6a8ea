//! N-firm simultaneous-move quantity competition.

use crate::config::MarketConfig;
use crate::{EquilibriumResult, SolveError};

/// Nash equilibrium via damped simultaneous best response.
///
/// Every round reads only the previous round's quantity vector and produces a
/// brand-new vector, so firm order cannot affect the outcome. The raw
/// simultaneous map orbits once three or more firms are present (its Jacobian
/// eigenvalue on the aggregate mode is `-(n-1)/2`), so each round mixes the
/// previous vector with the best responses:
///
/// `q' = (1 - w) * q + w * BR(q)`
///
/// The fixed point is unchanged and the default weight `w = 2/(n+1)` zeroes
/// the aggregate mode, contracting at rate `n/(n+1)` for every `n`.
#[derive(Debug, Clone)]
pub struct CournotSolver {
    /// Euclidean-norm tolerance on the change between successive rounds.
    pub tolerance: f64,
    /// Hard cap on rounds before giving up with `DidNotConverge`.
    pub max_iterations: usize,
    /// Relaxation weight override; `None` selects `2/(n+1)`.
    pub relaxation: Option<f64>,
}

impl Default for CournotSolver {
    fn default() -> Self {
        CournotSolver {
            tolerance: 1e-4,
            max_iterations: 10_000,
            relaxation: None,
        }
    }
}

impl CournotSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Profit-maximizing output for one firm given its rivals' total output:
    /// `max(0, (alpha - beta * rivals_total - c) / (2 * beta))`.
    ///
    /// A firm whose marginal cost exceeds the residual price is clamped to
    /// zero output, a valid outcome, not an error.
    pub fn best_response(config: &MarketConfig, rivals_total: f64, marginal_cost: f64) -> f64 {
        ((config.alpha - config.beta * rivals_total - marginal_cost) / (2.0 * config.beta)).max(0.0)
    }

    /// Iterate damped simultaneous best responses from the configured initial
    /// guess until the change between rounds drops below the tolerance.
    pub fn solve(&self, config: &MarketConfig) -> Result<EquilibriumResult, SolveError> {
        config.validate()?;
        let n = config.n() as f64;
        let weight = self.relaxation.unwrap_or(2.0 / (n + 1.0));

        let mut quantities = config.initial_guess.clone();
        for _ in 0..self.max_iterations {
            let total: f64 = quantities.iter().sum();
            let next: Vec<f64> = quantities
                .iter()
                .zip(&config.cost_params)
                .map(|(&q, &c)| {
                    let response = Self::best_response(config, total - q, c);
                    (1.0 - weight) * q + weight * response
                })
                .collect();
            let change = norm_diff(&next, &quantities);
            quantities = next;
            if change < self.tolerance {
                return Ok(EquilibriumResult::from_quantities(config, quantities));
            }
        }
        Err(SolveError::DidNotConverge {
            iterations: self.max_iterations,
        })
    }
}

/// Closed-form Cournot equilibrium of a residual linear market with demand
/// intercept `intercept`, slope `beta` and the given marginal costs.
///
/// Among `m` active firms with cost sum `S`, firm `i` produces
/// `(intercept + S - (m+1) c_i) / ((m+1) beta)`. A firm whose candidate
/// quantity is not positive cannot profitably produce, so it is removed and
/// the closed form re-solved among the remaining firms; removed firms end at
/// zero and the survivors play genuine best responses. Each pass shrinks the
/// active set, so the loop terminates.
pub fn residual_equilibrium(intercept: f64, beta: f64, costs: &[f64]) -> Vec<f64> {
    let mut quantities = vec![0.0; costs.len()];
    let mut active: Vec<usize> = (0..costs.len()).collect();
    while !active.is_empty() {
        let m = active.len() as f64;
        let s: f64 = active.iter().map(|&i| costs[i]).sum();
        let candidate: Vec<f64> = active
            .iter()
            .map(|&i| (intercept + s - (m + 1.0) * costs[i]) / ((m + 1.0) * beta))
            .collect();
        if candidate.iter().all(|&q| q >= 0.0) {
            for (&i, &q) in active.iter().zip(&candidate) {
                quantities[i] = q;
            }
            break;
        }
        active = active
            .iter()
            .zip(&candidate)
            .filter(|(_, &q)| q > 0.0)
            .map(|(&i, _)| i)
            .collect();
    }
    quantities
}

fn norm_diff(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}
