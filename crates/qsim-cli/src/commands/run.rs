//! Run command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;

use qsim_engine::{EngineConfig, Simulator};

use super::common::{OutputFormat, load_circuit, print_run};

/// Execute the run command.
pub fn execute(
    config: &EngineConfig,
    input: &Path,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<()> {
    let circuit = load_circuit(input, config)?;
    let result = Simulator::new(config.clone()).run(&circuit, seed)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Table => {
            println!(
                "{} Running {} ({} qubits, {} gates)",
                style("→").cyan().bold(),
                style(input.display()).green(),
                circuit.qubit_count(),
                circuit.len()
            );
            print_run(&result);
        }
    }

    Ok(())
}
