//! Build command implementation.
//!
//! Assembles a circuit description from gate arguments, validating each gate
//! on the way in.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qsim_engine::EngineConfig;
use qsim_ir::{Circuit, GateSpec};

/// Execute the build command.
pub fn execute(
    config: &EngineConfig,
    qubits: u32,
    gates: &[GateSpec],
    output: Option<&Path>,
) -> Result<()> {
    let mut circuit = Circuit::with_ceiling(qubits, config.limits.max_qubits)?;
    for (position, spec) in gates.iter().enumerate() {
        circuit
            .add_gate(spec.kind, spec.target, spec.control)
            .with_context(|| format!("Gate #{position} is invalid"))?;
    }

    let json = circuit.to_description().to_json_pretty()?;

    match output {
        Some(path) => {
            fs::write(path, format!("{json}\n"))
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            eprintln!(
                "{} Wrote {} qubits, {} gates to {}",
                style("✓").green().bold(),
                circuit.qubit_count(),
                circuit.len(),
                style(path.display()).green()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}
