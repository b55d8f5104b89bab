//! Qsim Command-Line Interface
//!
//! The main entry point for the Qsim CLI tool.
//!
//! ```text
//!   q0: ─[H]──●──
//!             │
//!   q1: ─────[X]─
//!
//!        Q S I M
//!   Exact Statevector Simulation
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use qsim_ir::GateSpec;

use commands::common::{OutputFormat, load_config, parse_gate_arg};
use commands::{build, run, sample, validate, version};

/// Qsim - exact quantum-circuit simulation from the command line
#[derive(Parser)]
#[command(name = "qsim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Engine configuration file (YAML)
    #[arg(short, long, global = true, env = "QSIM_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a circuit description from gate specs
    Build {
        /// Number of qubits
        #[arg(short, long)]
        qubits: u32,

        /// Gate to append: kind:target or cnot:control:target (repeatable)
        #[arg(short, long = "gate", value_parser = parse_gate_arg)]
        gates: Vec<GateSpec>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that a circuit description is valid
    Validate {
        /// Input file (JSON circuit description)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Evolve a circuit and measure every qubit once
    Run {
        /// Input file (JSON circuit description)
        #[arg(short, long)]
        input: PathBuf,

        /// Seed for the measurement RNG
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Histogram repeated measurements of the final state
    Sample {
        /// Input file (JSON circuit description)
        #[arg(short, long)]
        input: PathBuf,

        /// Number of shots
        #[arg(short, long, default_value = "1024")]
        shots: u32,

        /// Seed for the measurement RNG
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    // Setup logging
    let filter = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Build {
            qubits,
            gates,
            output,
        } => build::execute(&config, qubits, &gates, output.as_deref()),

        Commands::Validate { input } => validate::execute(&config, &input),

        Commands::Run {
            input,
            seed,
            format,
        } => run::execute(&config, &input, seed, format),

        Commands::Sample {
            input,
            shots,
            seed,
            format,
        } => sample::execute(&config, &input, shots, seed, format),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
