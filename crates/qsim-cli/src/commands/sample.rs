//! Sample command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use qsim_engine::{EngineConfig, Simulator};

use super::common::{OutputFormat, load_circuit, print_counts, print_warnings};

/// Execute the sample command.
pub fn execute(
    config: &EngineConfig,
    input: &Path,
    shots: u32,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<()> {
    let circuit = load_circuit(input, config)?;

    if format == OutputFormat::Table {
        println!(
            "{} Sampling {} ({} shots)",
            style("→").cyan().bold(),
            style(input.display()).green(),
            shots
        );
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(format!("Measuring {shots} shots..."));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = Simulator::new(config.clone()).sample(&circuit, shots, seed);
    spinner.finish_and_clear();
    let result = result?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Table => {
            print_counts(&result.counts, result.shots);
            print_warnings(&result.warnings);
        }
    }

    Ok(())
}
