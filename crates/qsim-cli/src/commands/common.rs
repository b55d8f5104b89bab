//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use console::style;
use tracing::debug;

use qsim_engine::{Counts, EngineConfig, RunResult, Warning};
use qsim_ir::{Circuit, CircuitDescription, GateKind, GateSpec};

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables.
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// Load the engine configuration (file, then environment overrides).
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    EngineConfig::load(path).with_context(|| match path {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Invalid engine configuration".to_string(),
    })
}

/// Load and validate a circuit from a JSON description file.
pub fn load_circuit(path: &Path, config: &EngineConfig) -> Result<Circuit> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let description = CircuitDescription::from_json(&source)
        .with_context(|| format!("Failed to parse circuit description: {}", path.display()))?;

    let circuit = description
        .into_circuit(config.limits.max_qubits)
        .with_context(|| format!("Invalid circuit in {}", path.display()))?;
    debug!(
        "Loaded {}: {} qubits, {} gates",
        path.display(),
        circuit.qubit_count(),
        circuit.len()
    );
    Ok(circuit)
}

/// Parse a `kind:target` or `cnot:control:target` gate argument.
pub fn parse_gate_arg(arg: &str) -> Result<GateSpec, String> {
    let parts: Vec<&str> = arg.split(':').map(str::trim).collect();
    let kind: GateKind = parts[0].parse().map_err(|e| format!("{e}"))?;

    let qubit = |s: &str| {
        s.parse::<u32>()
            .map_err(|_| format!("'{s}' is not a qubit index"))
    };

    match (kind.is_controlled(), parts.as_slice()) {
        (false, [_, target]) => Ok(GateSpec::single(kind, qubit(*target)?)),
        (true, [_, control, target]) => Ok(GateSpec::cnot(qubit(*control)?, qubit(*target)?)),
        (false, _) => Err(format!("expected {}:TARGET, got '{arg}'", kind.name().to_lowercase())),
        (true, _) => Err(format!("expected cnot:CONTROL:TARGET, got '{arg}'")),
    }
}

/// Print a single run as tables.
pub fn print_run(result: &RunResult) {
    println!("\n{} Amplitudes:", style("✓").green().bold());
    for (entry, prob) in result.amplitudes.iter().zip(&result.probabilities) {
        let bar: String = "█".repeat((prob.probability * 50.0).round() as usize);
        println!(
            "  {}: {:>9.6} {:+.6}i  ({:>6.2}%) {}",
            style(&prob.label).cyan(),
            entry.re,
            entry.im,
            prob.probability * 100.0,
            style(bar).green()
        );
    }

    println!("\n{} Measurements:", style("✓").green().bold());
    let measured: String = result
        .measurements
        .iter()
        .rev()
        .map(|m| m.outcome.to_string())
        .collect();
    for m in &result.measurements {
        println!("  {}: {}", style(m.qubit).cyan(), style(m.outcome).yellow());
    }
    println!("  Collapsed to {}", style(format!("|{measured}⟩")).bold());

    print_warnings(&result.warnings);
}

/// Print a shot histogram.
pub fn print_counts(counts: &Counts, shots: u32) {
    println!(
        "\n{} Results ({} shots):",
        style("✓").green().bold(),
        shots
    );

    let sorted = counts.sorted();
    let total = counts.total_shots() as f64;

    for (bitstring, count) in sorted.iter().take(16) {
        let prob = **count as f64 / total * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > 16 {
        println!("  ... and {} more outcomes", sorted.len() - 16);
    }
}

/// Print numeric warnings, if any.
pub fn print_warnings(warnings: &[Warning]) {
    for warning in warnings {
        let Warning::NumericInstability {
            gate_position,
            drift,
        } = warning;
        println!(
            "  {} Numeric instability after gate {}: norm drift {:.3e}",
            style("!").yellow().bold(),
            gate_position,
            drift
        );
    }
}
