//! Baseline two-firm market: Cournot and Stackelberg equilibria side by side.

use oligopoly::{CournotSolver, MarketConfig, StackelbergSolver};
use std::error::Error;
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("Solve failed: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = MarketConfig::baseline();

    println!("=== Oligopoly Equilibrium Solver ===");
    println!(
        "Demand: p = max(0, {} - {} Q)",
        config.alpha, config.beta
    );
    println!("Marginal costs: {:?}\n", config.cost_params);

    let cournot = CournotSolver::default().solve(&config)?;
    println!("Cournot-Nash equilibrium:");
    for (i, (q, profit)) in cournot
        .quantities
        .iter()
        .zip(&cournot.profits)
        .enumerate()
    {
        println!("  Firm {}: quantity {:.2}, profit {:.2}", i, q, profit);
    }
    println!("  Market price: {:.2}", cournot.price);
    println!("  Total quantity: {:.2}\n", cournot.total_quantity());

    // The unconstrained leader optimum sits above the default (0, 50) box;
    // widen the bounds so the commitment effect is visible.
    let config = config.with_bounds(vec![(0.0, 200.0); 2])?;
    let stackelberg = StackelbergSolver::new().solve(&config)?;
    println!("Stackelberg equilibrium (firm 0 leads):");
    for (i, (q, profit)) in stackelberg
        .quantities
        .iter()
        .zip(&stackelberg.profits)
        .enumerate()
    {
        println!("  Firm {}: quantity {:.2}, profit {:.2}", i, q, profit);
    }
    println!("  Market price: {:.2}", stackelberg.price);
    println!("  Total quantity: {:.2}", stackelberg.total_quantity());

    Ok(())
}
