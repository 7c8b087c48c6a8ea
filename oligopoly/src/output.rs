//! CSV and JSON export of solved equilibria for downstream analysis
//! (pandas, plotting scripts).

use crate::config::MarketConfig;
use crate::sweep::SweepRow;
use crate::EquilibriumResult;
use serde::Serialize;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Write sweep rows to CSV: one line per swept cost, one quantity and one
/// profit column per firm.
pub fn write_sweep_csv<P: AsRef<Path>>(path: P, rows: &[SweepRow]) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;

    let n = rows.first().map_or(0, |r| r.quantities.len());
    let mut header = vec!["cost".to_string()];
    for i in 0..n {
        header.push(format!("quantity_{}", i));
    }
    header.push("price".to_string());
    for i in 0..n {
        header.push(format!("profit_{}", i));
    }
    wtr.write_record(&header)?;

    for row in rows {
        let mut record = vec![row.cost.to_string()];
        record.extend(row.quantities.iter().map(|q| q.to_string()));
        record.push(row.price.to_string());
        record.extend(row.profits.iter().map(|p| p.to_string()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write one equilibrium to CSV, one line per firm.
pub fn write_equilibrium_csv<P: AsRef<Path>>(
    path: P,
    config: &MarketConfig,
    result: &EquilibriumResult,
) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["firm", "marginal_cost", "quantity", "price", "profit"])?;
    for i in 0..config.n() {
        wtr.write_record(&[
            i.to_string(),
            config.cost_params[i].to_string(),
            result.quantities[i].to_string(),
            result.price.to_string(),
            result.profits[i].to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Summary bundling the config, the outcome and run metadata for
/// reproducibility.
#[derive(Debug, Clone, Serialize)]
pub struct SolveSummary {
    pub timestamp: String,
    pub config: MarketConfig,
    pub result: EquilibriumResult,
}

impl SolveSummary {
    pub fn new(config: &MarketConfig, result: &EquilibriumResult) -> Self {
        SolveSummary {
            timestamp: chrono::Utc::now().to_rfc3339(),
            config: config.clone(),
            result: result.clone(),
        }
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn Error>> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
