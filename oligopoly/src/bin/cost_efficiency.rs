//! Cost-efficiency experiment: vary one firm's marginal cost and tabulate the
//! Cournot equilibrium at each point.
//!
//! Usage:
//!   cargo run --release --bin cost_efficiency -- oligopoly/experiments/cost_efficiency.toml

use oligopoly::output::{write_equilibrium_csv, write_sweep_csv, SolveSummary};
use oligopoly::sweep::CostSweep;
use oligopoly::{CournotSolver, MarketConfig};
use serde::Deserialize;
use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;
use std::process;

#[derive(Debug, Deserialize)]
struct ExperimentConfig {
    market: MarketSection,
    sweep: SweepSection,
    output: OutputSection,
}

#[derive(Debug, Deserialize)]
struct MarketSection {
    alpha: f64,
    beta: f64,
    cost_params: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct SweepSection {
    firm: usize,
    from: f64,
    to: f64,
    steps: usize,
}

#[derive(Debug, Deserialize)]
struct OutputSection {
    dir: String,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <experiment_config.toml>", args[0]);
        eprintln!(
            "Example: {} oligopoly/experiments/cost_efficiency.toml",
            args[0]
        );
        process::exit(1);
    }
    if let Err(e) = run(&args[1]) {
        eprintln!("Experiment failed: {}", e);
        process::exit(1);
    }
}

fn run(config_path: &str) -> Result<(), Box<dyn Error>> {
    let config_str = fs::read_to_string(config_path)?;
    let exp: ExperimentConfig = toml::from_str(&config_str)?;

    let market = MarketConfig::new(exp.market.alpha, exp.market.beta, exp.market.cost_params)?;
    let sweep = CostSweep {
        firm: exp.sweep.firm,
        from: exp.sweep.from,
        to: exp.sweep.to,
        steps: exp.sweep.steps,
    };

    println!(
        "Sweeping firm {} cost over [{}, {}] in {} steps ({} firms)\n",
        sweep.firm,
        sweep.from,
        sweep.to,
        sweep.steps,
        market.n()
    );

    let solver = CournotSolver::default();
    let rows = sweep.run(&market, &solver)?;

    println!(
        "{:>8} | {:>10} | {:>8} | {:>10} | {:>10}",
        "Cost", "Quantity", "Price", "Profit", "Total Q"
    );
    println!(
        "{:-<8}-+-{:-<10}-+-{:-<8}-+-{:-<10}-+-{:-<10}",
        "", "", "", "", ""
    );
    for row in &rows {
        let total: f64 = row.quantities.iter().sum();
        println!(
            "{:>8.3} | {:>10.2} | {:>8.2} | {:>10.2} | {:>10.2}",
            row.cost, row.quantities[sweep.firm], row.price, row.profits[sweep.firm], total
        );
    }

    let dir = Path::new(&exp.output.dir);
    fs::create_dir_all(dir)?;
    write_sweep_csv(dir.join("cost_sweep.csv"), &rows)?;

    // Baseline (un-swept) equilibrium and summary for reproducibility
    let baseline = solver.solve(&market)?;
    write_equilibrium_csv(dir.join("baseline_equilibrium.csv"), &market, &baseline)?;
    SolveSummary::new(&market, &baseline).write_json(dir.join("summary.json"))?;

    println!(
        "\nWrote {} rows to {}",
        rows.len(),
        dir.join("cost_sweep.csv").display()
    );
    Ok(())
}
