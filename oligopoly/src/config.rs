//! Market configuration: the immutable input of every solve.

use crate::{model, SolveError};
use serde::{Deserialize, Serialize};

/// Per-firm starting quantity when no explicit guess is given.
pub const DEFAULT_INITIAL_GUESS: f64 = 10.0;
/// Per-firm output box when no explicit bounds are given.
pub const DEFAULT_BOUNDS: (f64, f64) = (0.0, 50.0);

/// Description of a linear-demand oligopoly market.
///
/// `alpha` and `beta` are the inverse demand intercept and slope; firm `i`
/// produces at constant marginal cost `cost_params[i]`. `initial_guess` seeds
/// the fixed-point and optimizer searches, and `bounds[i]` boxes firm `i`'s
/// output wherever numerical optimization is involved (the Cournot closed-form
/// iteration only clamps at zero).
///
/// Validated eagerly: an invalid description never reaches an iteration loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    pub alpha: f64,
    pub beta: f64,
    pub cost_params: Vec<f64>,
    pub initial_guess: Vec<f64>,
    pub bounds: Vec<(f64, f64)>,
}

impl MarketConfig {
    /// Build a market with the default initial guess and output bounds,
    /// one entry per cost coefficient.
    pub fn new(alpha: f64, beta: f64, cost_params: Vec<f64>) -> Result<Self, SolveError> {
        let n = cost_params.len();
        let config = MarketConfig {
            alpha,
            beta,
            cost_params,
            initial_guess: vec![DEFAULT_INITIAL_GUESS; n],
            bounds: vec![DEFAULT_BOUNDS; n],
        };
        config.validate()?;
        Ok(config)
    }

    /// Symmetric market: `n` firms sharing one marginal cost.
    pub fn symmetric(alpha: f64, beta: f64, n: usize, cost: f64) -> Result<Self, SolveError> {
        MarketConfig::new(alpha, beta, vec![cost; n])
    }

    /// The project's baseline two-firm market: alpha 100, beta 0.5,
    /// marginal costs 0.5 and 0.1.
    pub fn baseline() -> Self {
        MarketConfig::new(100.0, 0.5, vec![0.5, 0.1]).expect("baseline config is valid")
    }

    /// Replace the initial guess, re-validating.
    pub fn with_initial_guess(mut self, initial_guess: Vec<f64>) -> Result<Self, SolveError> {
        self.initial_guess = initial_guess;
        self.validate()?;
        Ok(self)
    }

    /// Replace the per-firm output bounds, re-validating.
    pub fn with_bounds(mut self, bounds: Vec<(f64, f64)>) -> Result<Self, SolveError> {
        self.bounds = bounds;
        self.validate()?;
        Ok(self)
    }

    /// Number of firms.
    pub fn n(&self) -> usize {
        self.cost_params.len()
    }

    /// Inverse demand at total output `total_quantity`.
    pub fn demand_price(&self, total_quantity: f64) -> f64 {
        model::demand_price(self.alpha, self.beta, total_quantity)
    }

    /// Production cost of `quantity` units for firm `firm`.
    pub fn cost(&self, quantity: f64, firm: usize) -> f64 {
        model::cost(quantity, self.cost_params[firm])
    }

    /// Check every construction invariant. Solvers call this before iterating
    /// so a hand-mutated config cannot reach the loop either.
    pub fn validate(&self) -> Result<(), SolveError> {
        let n = self.cost_params.len();
        if n < 1 {
            return Err(invalid("at least one firm is required"));
        }
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(invalid(format!(
                "demand intercept alpha must be positive and finite, got {}",
                self.alpha
            )));
        }
        if !self.beta.is_finite() || self.beta <= 0.0 {
            return Err(invalid(format!(
                "demand slope beta must be positive and finite, got {}",
                self.beta
            )));
        }
        if self.initial_guess.len() != n || self.bounds.len() != n {
            return Err(invalid(format!(
                "cost_params ({}), initial_guess ({}) and bounds ({}) must have one entry per firm",
                n,
                self.initial_guess.len(),
                self.bounds.len()
            )));
        }
        for (i, &c) in self.cost_params.iter().enumerate() {
            if !c.is_finite() || c < 0.0 {
                return Err(invalid(format!(
                    "marginal cost of firm {} must be non-negative and finite, got {}",
                    i, c
                )));
            }
        }
        for (i, &(lo, hi)) in self.bounds.iter().enumerate() {
            if !lo.is_finite() || !hi.is_finite() || lo < 0.0 || lo >= hi {
                return Err(invalid(format!(
                    "bounds of firm {} must satisfy 0 <= lo < hi, got ({}, {})",
                    i, lo, hi
                )));
            }
        }
        for (i, &q) in self.initial_guess.iter().enumerate() {
            let (lo, hi) = self.bounds[i];
            if !q.is_finite() || q < lo || q > hi {
                return Err(invalid(format!(
                    "initial guess of firm {} must lie in its bounds ({}, {}), got {}",
                    i, lo, hi, q
                )));
            }
        }
        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> SolveError {
    SolveError::InvalidConfiguration(reason.into())
}
