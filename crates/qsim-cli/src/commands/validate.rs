//! Validate command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;

use qsim_engine::{EngineConfig, Evolution};

use super::common::load_circuit;

/// Execute the validate command.
pub fn execute(config: &EngineConfig, input: &Path) -> Result<()> {
    let circuit = load_circuit(input, config)?;

    println!(
        "{} {} is valid: {} qubits, {} gates",
        style("✓").green().bold(),
        style(input.display()).green(),
        circuit.qubit_count(),
        circuit.len()
    );

    if let Err(e) = Evolution::new(config).admit(&circuit) {
        println!("  {} {}", style("!").yellow().bold(), e);
    }

    Ok(())
}
