//! Oligopoly equilibrium solvers
//!
//! Computes static one-shot equilibria for quantity competition under a linear
//! inverse demand curve `p = max(0, alpha - beta * Q)` with constant per-firm
//! marginal costs:
//!
//! - Cournot: n firms choose output simultaneously; solved by damped
//!   simultaneous best response.
//! - Stackelberg: firm 0 commits first; the remaining firms play the Cournot
//!   subgame, which has a closed form, so only the leader's output needs a
//!   bounded numerical search.
//! - Cartel: a coalition commits to member outputs jointly while outsiders
//!   best-respond to the coalition's total output.
//!
//! Solvers are pure functions of a [`MarketConfig`]: no shared state, no I/O,
//! no retries. Independent solves can run in parallel without coordination
//! (the sweep module does exactly that).

pub mod cartel;
pub mod config;
pub mod cournot;
pub mod model;
pub mod optimize;
pub mod output;
pub mod stackelberg;
pub mod sweep;

pub use cartel::{CartelOutcome, CartelPartition, CartelSolver};
pub use config::MarketConfig;
pub use cournot::CournotSolver;
pub use stackelberg::StackelbergSolver;

use serde::Serialize;
use std::fmt;

/// Failure modes of configuration and solving.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The market description is internally inconsistent. Detected at
    /// construction, before any iteration runs.
    InvalidConfiguration(String),
    /// An iteration or evaluation budget ran out before the tolerance was
    /// met. No partial result is returned.
    DidNotConverge { iterations: usize },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::InvalidConfiguration(reason) => {
                write!(f, "invalid market configuration: {}", reason)
            }
            SolveError::DidNotConverge { iterations } => {
                write!(f, "did not converge within {} iterations", iterations)
            }
        }
    }
}

impl std::error::Error for SolveError {}

/// Market equilibrium: one quantity and one profit per firm plus the clearing
/// price. Immutable once constructed; index-aligned with
/// `MarketConfig::cost_params`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquilibriumResult {
    pub quantities: Vec<f64>,
    pub price: f64,
    pub profits: Vec<f64>,
}

impl EquilibriumResult {
    /// Assemble price and per-firm profits from a final quantity vector.
    pub(crate) fn from_quantities(config: &MarketConfig, quantities: Vec<f64>) -> Self {
        let total: f64 = quantities.iter().sum();
        let price = model::demand_price(config.alpha, config.beta, total);
        let profits = quantities
            .iter()
            .zip(&config.cost_params)
            .map(|(&q, &c)| model::profit(price, q, c))
            .collect();
        EquilibriumResult {
            quantities,
            price,
            profits,
        }
    }

    /// Total market output.
    pub fn total_quantity(&self) -> f64 {
        self.quantities.iter().sum()
    }

    /// Industry-wide profit.
    pub fn total_profit(&self) -> f64 {
        self.profits.iter().sum()
    }

    /// Summed profit over a subset of firms.
    pub fn profit_of(&self, firms: &[usize]) -> f64 {
        firms.iter().map(|&i| self.profits[i]).sum()
    }
}

/// Equilibrium concept to apply to a market.
///
/// Tagged dispatch instead of a trait object: the three solvers share a
/// `MarketConfig -> EquilibriumResult` shape but carry different settings.
#[derive(Debug, Clone)]
pub enum Solver {
    Cournot(CournotSolver),
    Stackelberg(StackelbergSolver),
    Cartel {
        solver: CartelSolver,
        partition: CartelPartition,
    },
}

impl Solver {
    pub fn solve(&self, config: &MarketConfig) -> Result<EquilibriumResult, SolveError> {
        match self {
            Solver::Cournot(s) => s.solve(config),
            Solver::Stackelberg(s) => s.solve(config),
            Solver::Cartel { solver, partition } => {
                solver.solve(config, partition).map(|outcome| outcome.result)
            }
        }
    }
}
