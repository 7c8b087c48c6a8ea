//! Cartel formation across market sizes: a fixed two-firm cartel inside a
//! market of n identical firms, compared against the outsiders and against a
//! single defector.
//!
//! The defector column answers the classic instability question: a member who
//! best-responds to everyone else's committed output earns more than a loyal
//! member, which is why cartels need enforcement.

use oligopoly::{CartelOutcome, CartelPartition, CartelSolver, CournotSolver, MarketConfig};
use std::error::Error;
use std::process;

const ALPHA: f64 = 100.0;
const BETA: f64 = 0.5;
const COST: f64 = 10.0;
const CARTEL_SIZE: usize = 2;

fn main() {
    if let Err(e) = run() {
        eprintln!("Experiment failed: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    println!(
        "Two-firm cartel in a symmetric market (alpha={}, beta={}, c={})\n",
        ALPHA, BETA, COST
    );
    println!(
        "{:>5} | {:>12} | {:>12} | {:>12}",
        "Firms", "Cartel/firm", "Outsider", "Defector"
    );
    println!("{:-<5}-+-{:-<12}-+-{:-<12}-+-{:-<12}", "", "", "", "");

    let solver = CartelSolver::new();
    let partition = CartelPartition::new((0..CARTEL_SIZE).collect())?;

    for n in 3..=20 {
        let config = MarketConfig::symmetric(ALPHA, BETA, n, COST)?
            .with_bounds(vec![(0.0, 120.0); n])?;
        let outcome = solver.solve(&config, &partition)?;

        let per_member = outcome.cartel_profit / CARTEL_SIZE as f64;
        let outsiders = partition.outsiders(n);
        let outsider = outcome.outsider_profit / outsiders.len() as f64;
        let defector = defector_profit(&config, &outcome);

        println!(
            "{:>5} | {:>12.2} | {:>12.2} | {:>12.2}",
            n, per_member, outsider, defector
        );
    }

    println!("\nDefection beats loyalty at every market size; collusion is unstable without enforcement.");
    Ok(())
}

/// Payoff of cartel member 0 if it deviates and best-responds to everyone
/// else's committed output.
fn defector_profit(config: &MarketConfig, outcome: &CartelOutcome) -> f64 {
    let others: f64 = outcome.result.quantities.iter().skip(1).sum();
    let q = CournotSolver::best_response(config, others, config.cost_params[0]);
    let price = config.demand_price(others + q);
    price * q - config.cost(q, 0)
}
