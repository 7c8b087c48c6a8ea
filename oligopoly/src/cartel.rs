//! Coalition-profit optimization.
//!
//! A cartel commits to its members' outputs jointly while outsider firms
//! best-respond to the cartel's total output, mirroring the leader-follower
//! structure with a group leader. The cartel's joint profit is maximized by
//! box-constrained coordinate descent over the member quantity vector.

use crate::config::MarketConfig;
use crate::optimize::BoundedMinimizer;
use crate::{cournot, model};
use crate::{EquilibriumResult, SolveError};
use serde::Serialize;

/// Subset of firm indices designated as colluding; the complement stays
/// non-cooperative. Stored sorted; duplicates and empty sets are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartelPartition {
    members: Vec<usize>,
}

impl CartelPartition {
    pub fn new(mut members: Vec<usize>) -> Result<Self, SolveError> {
        if members.is_empty() {
            return Err(SolveError::InvalidConfiguration(
                "a cartel needs at least one member".into(),
            ));
        }
        members.sort_unstable();
        if members.windows(2).any(|w| w[0] == w[1]) {
            return Err(SolveError::InvalidConfiguration(
                "cartel members must be distinct firm indices".into(),
            ));
        }
        Ok(CartelPartition { members })
    }

    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn contains(&self, firm: usize) -> bool {
        self.members.binary_search(&firm).is_ok()
    }

    /// Non-member firm indices for a market of `n` firms.
    pub fn outsiders(&self, n: usize) -> Vec<usize> {
        (0..n).filter(|&i| !self.contains(i)).collect()
    }

    /// Fails when any member index falls outside the market's firm range.
    pub fn validate_for(&self, n: usize) -> Result<(), SolveError> {
        if let Some(&last) = self.members.last() {
            if last >= n {
                return Err(SolveError::InvalidConfiguration(format!(
                    "cartel member {} out of range for {} firms",
                    last, n
                )));
            }
        }
        Ok(())
    }
}

/// Outcome of a cartel solve: the full market equilibrium plus the profit
/// split between coalition and outsiders.
#[derive(Debug, Clone, Serialize)]
pub struct CartelOutcome {
    pub partition: CartelPartition,
    pub result: EquilibriumResult,
    pub cartel_profit: f64,
    pub outsider_profit: f64,
}

impl CartelOutcome {
    /// Member quantities in partition order.
    pub fn member_quantities(&self) -> Vec<f64> {
        self.partition
            .members()
            .iter()
            .map(|&i| self.result.quantities[i])
            .collect()
    }

    /// Outsider quantities in index order.
    pub fn outsider_quantities(&self) -> Vec<f64> {
        self.partition
            .outsiders(self.result.quantities.len())
            .iter()
            .map(|&i| self.result.quantities[i])
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CartelSolver {
    /// Box-constrained search applied to the member quantity vector.
    pub minimizer: BoundedMinimizer,
}

impl CartelSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outsiders' Cournot-subgame outputs given the cartel's total committed
    /// output. Same residual-market solve as the Stackelberg follower
    /// subgame: a priced-out outsider drops out of the closed form instead
    /// of inflating the rest.
    fn outsider_equilibrium(
        config: &MarketConfig,
        outsiders: &[usize],
        cartel_total: f64,
    ) -> Vec<f64> {
        let a = config.alpha - config.beta * cartel_total;
        let costs: Vec<f64> = outsiders.iter().map(|&i| config.cost_params[i]).collect();
        cournot::residual_equilibrium(a, config.beta, &costs)
    }

    /// Negated joint cartel profit for a candidate member quantity vector.
    fn joint_objective(
        config: &MarketConfig,
        partition: &CartelPartition,
        outsiders: &[usize],
        member_quantities: &[f64],
    ) -> f64 {
        let cartel_total: f64 = member_quantities.iter().sum();
        let outsider_quantities = Self::outsider_equilibrium(config, outsiders, cartel_total);
        let total = cartel_total + outsider_quantities.iter().sum::<f64>();
        let price = model::demand_price(config.alpha, config.beta, total);
        -partition
            .members()
            .iter()
            .zip(member_quantities)
            .map(|(&i, &q)| model::profit(price, q, config.cost_params[i]))
            .sum::<f64>()
    }

    /// Maximize the coalition's summed profit over its members' quantities,
    /// then compute outsiders once from the optimal cartel output and
    /// assemble the full market equilibrium.
    ///
    /// Degenerate cases work unchanged: a full-market cartel is a multi-plant
    /// monopoly (no outsiders), a single-member cartel is a single-leader
    /// Stackelberg solve.
    pub fn solve(
        &self,
        config: &MarketConfig,
        partition: &CartelPartition,
    ) -> Result<CartelOutcome, SolveError> {
        config.validate()?;
        partition.validate_for(config.n())?;

        let outsiders = partition.outsiders(config.n());
        let start: Vec<f64> = partition
            .members()
            .iter()
            .map(|&i| config.initial_guess[i])
            .collect();
        let bounds: Vec<(f64, f64)> = partition
            .members()
            .iter()
            .map(|&i| config.bounds[i])
            .collect();

        let member_quantities = self.minimizer.minimize(
            |q| Self::joint_objective(config, partition, &outsiders, q),
            &start,
            &bounds,
        )?;

        let cartel_total: f64 = member_quantities.iter().sum();
        let outsider_quantities = Self::outsider_equilibrium(config, &outsiders, cartel_total);

        let mut quantities = vec![0.0; config.n()];
        for (&i, &q) in partition.members().iter().zip(&member_quantities) {
            quantities[i] = q;
        }
        for (&i, &q) in outsiders.iter().zip(&outsider_quantities) {
            quantities[i] = q;
        }

        let result = EquilibriumResult::from_quantities(config, quantities);
        let cartel_profit = result.profit_of(partition.members());
        let outsider_profit = result.profit_of(&outsiders);
        Ok(CartelOutcome {
            partition: partition.clone(),
            result,
            cartel_profit,
            outsider_profit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn partition_rejects_empty_and_duplicate_members() {
        assert!(CartelPartition::new(vec![]).is_err());
        assert!(CartelPartition::new(vec![0, 1, 1]).is_err());
    }

    #[test]
    fn partition_sorts_members_and_derives_outsiders() {
        let partition = CartelPartition::new(vec![2, 0]).unwrap();
        assert_eq!(partition.members(), &[0, 2]);
        assert_eq!(partition.outsiders(4), vec![1, 3]);
        assert!(partition.contains(2));
        assert!(!partition.contains(1));
    }

    #[test]
    fn out_of_range_member_is_rejected_at_solve() {
        let config = MarketConfig::baseline();
        let partition = CartelPartition::new(vec![0, 5]).unwrap();
        assert!(matches!(
            CartelSolver::new().solve(&config, &partition),
            Err(SolveError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn full_market_cartel_reproduces_the_monopoly_optimum() {
        // Symmetric duopoly cartel: total output (alpha - c) / (2 beta) = 90,
        // price (alpha + c) / 2 = 55, regardless of the split across members.
        let config = MarketConfig::symmetric(100.0, 0.5, 2, 10.0)
            .unwrap()
            .with_bounds(vec![(0.0, 150.0); 2])
            .unwrap();
        let partition = CartelPartition::new(vec![0, 1]).unwrap();
        let outcome = CartelSolver::new().solve(&config, &partition).unwrap();

        assert_abs_diff_eq!(outcome.result.total_quantity(), 90.0, epsilon = 1e-2);
        assert_abs_diff_eq!(outcome.result.price, 55.0, epsilon = 1e-2);
        assert_abs_diff_eq!(outcome.cartel_profit, 4050.0, epsilon = 1.0);
        assert_eq!(outcome.outsider_profit, 0.0);
        assert!(outcome.outsider_quantities().is_empty());
    }

    #[test]
    fn single_member_cartel_equals_the_stackelberg_solve() {
        use crate::stackelberg::StackelbergSolver;

        let config = MarketConfig::new(100.0, 0.5, vec![0.5, 0.8, 0.6])
            .unwrap()
            .with_bounds(vec![(0.0, 200.0); 3])
            .unwrap();
        let partition = CartelPartition::new(vec![0]).unwrap();

        let outcome = CartelSolver::new().solve(&config, &partition).unwrap();
        let stackelberg = StackelbergSolver::new().solve(&config).unwrap();

        for (a, b) in outcome.result.quantities.iter().zip(&stackelberg.quantities) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-9);
        }
        assert_abs_diff_eq!(outcome.result.price, stackelberg.price, epsilon = 1e-9);
    }

    #[test]
    fn surviving_outsider_best_responds_when_another_is_priced_out() {
        use crate::cournot::CournotSolver;

        // Outsider 3 cannot cover its cost; outsider 2's output must be its
        // actual best response, not the inflated two-outsider closed form.
        let config = MarketConfig::new(100.0, 0.5, vec![1.0, 1.0, 0.1, 120.0])
            .unwrap()
            .with_bounds(vec![(0.0, 200.0); 4])
            .unwrap();
        let partition = CartelPartition::new(vec![0, 1]).unwrap();
        let outcome = CartelSolver::new().solve(&config, &partition).unwrap();

        assert_eq!(outcome.result.quantities[3], 0.0);
        let rivals = outcome.result.total_quantity() - outcome.result.quantities[2];
        let response = CournotSolver::best_response(&config, rivals, config.cost_params[2]);
        assert_abs_diff_eq!(outcome.result.quantities[2], response, epsilon = 1e-9);
    }

    #[test]
    fn outcome_splits_quantities_by_membership() {
        let config = MarketConfig::new(100.0, 0.5, vec![0.5, 0.8, 0.6])
            .unwrap()
            .with_bounds(vec![(0.0, 200.0); 3])
            .unwrap();
        let partition = CartelPartition::new(vec![0, 2]).unwrap();
        let outcome = CartelSolver::new().solve(&config, &partition).unwrap();

        assert_eq!(outcome.member_quantities().len(), 2);
        assert_eq!(outcome.outsider_quantities().len(), 1);
        assert_eq!(
            outcome.member_quantities()[0],
            outcome.result.quantities[0]
        );
        assert_eq!(
            outcome.outsider_quantities()[0],
            outcome.result.quantities[1]
        );
    }
}
