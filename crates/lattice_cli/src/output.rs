//! Rendering of pricing results as table, JSON or CSV.

use std::io::Write;

use lattice_pricing::{LatticeMethod, LatticeResult};
use serde::Serialize;

use crate::config::OutputFormat;
use crate::Result;

/// One line of pricing output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub label: String,
    pub method: LatticeMethod,
    pub steps: usize,
    pub price: f64,
    pub delta: Option<f64>,
    pub gamma: Option<f64>,
    pub theta: Option<f64>,
    /// Lattice price minus the closed-form price
    pub error: Option<f64>,
}

impl ResultRow {
    pub fn new(
        label: impl Into<String>,
        method: LatticeMethod,
        steps: usize,
        result: &LatticeResult<f64>,
    ) -> Self {
        Self {
            label: label.into(),
            method,
            steps,
            price: result.price,
            delta: result.delta,
            gamma: result.gamma,
            theta: result.theta,
            error: None,
        }
    }

    pub fn with_error(mut self, error: Option<f64>) -> Self {
        self.error = error;
        self
    }
}

/// Writes `rows` to `out` in `format`.
pub fn write_rows<W: Write>(rows: &[ResultRow], format: OutputFormat, mut out: W) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, rows)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => write_table(rows, &mut out)?,
    }
    Ok(())
}

fn write_table<W: Write>(rows: &[ResultRow], out: &mut W) -> std::io::Result<()> {
    let with_error = rows.iter().any(|row| row.error.is_some());
    let cell = |value: Option<f64>| value.map_or_else(|| "-".to_string(), |v| format!("{v:.6}"));

    write!(
        out,
        "{:<16} {:<11} {:>7} {:>12} {:>10} {:>10} {:>10}",
        "Contract", "Method", "Steps", "Price", "Delta", "Gamma", "Theta"
    )?;
    if with_error {
        write!(out, " {:>12}", "Error")?;
    }
    writeln!(out)?;

    for row in rows {
        write!(
            out,
            "{:<16} {:<11} {:>7} {:>12.6} {:>10} {:>10} {:>10}",
            row.label,
            row.method,
            row.steps,
            row.price,
            cell(row.delta),
            cell(row.gamma),
            cell(row.theta)
        )?;
        if with_error {
            let error = row
                .error
                .map_or_else(|| "-".to_string(), |e| format!("{e:+.3e}"));
            write!(out, " {:>12}", error)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
