//! Leader-follower sequential quantity competition, solved by backward
//! induction.
//!
//! Firm 0 commits to its output first; the remaining firms observe it and
//! play the Cournot subgame among themselves. Under linear demand that
//! subgame has a closed form, so only the leader's choice needs a numerical
//! search over its output bounds.

use crate::config::MarketConfig;
use crate::optimize::BoundedMinimizer;
use crate::{cournot, model};
use crate::{EquilibriumResult, SolveError};

#[derive(Debug, Clone, Default)]
pub struct StackelbergSolver {
    /// Bounded search applied to the leader's output interval.
    pub minimizer: BoundedMinimizer,
}

impl StackelbergSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Equilibrium outputs of the follower subgame given the leader's
    /// committed quantity.
    ///
    /// The followers play Cournot on the residual market with intercept
    /// `A = alpha - beta * q_leader`; for a single viable follower this is
    /// the textbook reaction `(A - c) / (2 beta)`. Followers priced out of
    /// the subgame produce zero and drop out of the closed form, so the
    /// survivors' outputs are their actual best responses.
    pub fn follower_equilibrium(config: &MarketConfig, leader_quantity: f64) -> Vec<f64> {
        let a = config.alpha - config.beta * leader_quantity;
        cournot::residual_equilibrium(a, config.beta, &config.cost_params[1..])
    }

    /// One follower's subgame output. `follower` indexes `cost_params` and
    /// must lie in `1..n`.
    pub fn follower_best_response(
        config: &MarketConfig,
        leader_quantity: f64,
        follower: usize,
    ) -> Result<f64, SolveError> {
        if follower == 0 || follower >= config.n() {
            return Err(SolveError::InvalidConfiguration(format!(
                "follower index must lie in 1..{}, got {}",
                config.n(),
                follower
            )));
        }
        Ok(Self::follower_equilibrium(config, leader_quantity)[follower - 1])
    }

    /// Negated leader profit after follower reactions. Negated because the
    /// bounded search is a minimizer.
    pub fn leader_objective(config: &MarketConfig, leader_quantity: f64) -> f64 {
        let followers = Self::follower_equilibrium(config, leader_quantity);
        let total = leader_quantity + followers.iter().sum::<f64>();
        let price = model::demand_price(config.alpha, config.beta, total);
        -model::profit(price, leader_quantity, config.cost_params[0])
    }

    /// Find the leader's optimal commitment over `bounds[0]`, then compute
    /// the followers once. No further iteration: the followers are
    /// deterministic given the leader's choice.
    pub fn solve(&self, config: &MarketConfig) -> Result<EquilibriumResult, SolveError> {
        config.validate()?;
        let (lo, hi) = config.bounds[0];
        let leader = self
            .minimizer
            .minimize_scalar(|q| Self::leader_objective(config, q), lo, hi)?;
        let mut quantities = vec![leader];
        quantities.extend(Self::follower_equilibrium(config, leader));
        Ok(EquilibriumResult::from_quantities(config, quantities))
    }
}
