//! Leader/follower profit as the leader's cost efficiency varies.
//!
//! Sweeps the leader-to-follower cost ratio in a duopoly and reports where
//! the first-mover advantage is overtaken by the leader's cost disadvantage.

use oligopoly::{MarketConfig, SolveError, StackelbergSolver};
use rayon::prelude::*;
use std::error::Error;
use std::process;

const ALPHA: f64 = 100.0;
const BETA: f64 = 0.5;
const FOLLOWER_COST: f64 = 0.1;
const STEPS: usize = 200;

fn main() {
    if let Err(e) = run() {
        eprintln!("Experiment failed: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let (from, to) = (0.01, 10.0);
    let leader_costs: Vec<f64> = (0..STEPS)
        .map(|i| from + (to - from) * i as f64 / (STEPS - 1) as f64)
        .collect();

    let solver = StackelbergSolver::new();
    let rows: Vec<(f64, f64, f64)> = leader_costs
        .into_par_iter()
        .map(|leader_cost| {
            let config = MarketConfig::new(ALPHA, BETA, vec![leader_cost, FOLLOWER_COST])?
                .with_bounds(vec![(0.0, 200.0); 2])?;
            let result = solver.solve(&config)?;
            Ok((
                leader_cost / FOLLOWER_COST,
                result.profits[0],
                result.profits[1],
            ))
        })
        .collect::<Result<_, SolveError>>()?;

    println!(
        "Stackelberg duopoly, follower cost fixed at {} (alpha={}, beta={})\n",
        FOLLOWER_COST, ALPHA, BETA
    );
    println!(
        "{:>10} | {:>12} | {:>12}",
        "c_L : c_F", "Leader", "Follower"
    );
    println!("{:-<10}-+-{:-<12}-+-{:-<12}", "", "", "");
    for (ratio, leader, follower) in rows.iter().step_by(20) {
        println!("{:>10.2} | {:>12.2} | {:>12.2}", ratio, leader, follower);
    }

    // The ratio where the two profit curves meet
    if let Some((ratio, leader, _)) = rows
        .iter()
        .min_by(|a, b| (a.1 - a.2).abs().total_cmp(&(b.1 - b.2).abs()))
    {
        println!(
            "\nProfit crossover: c_L:c_F ratio {:.2}, profit {:.2}",
            ratio, leader
        );
    }

    Ok(())
}
