//! One-shot simulation: evolve, then measure.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use qsim_ir::Circuit;

use crate::config::EngineConfig;
use crate::error::SimResult;
use crate::evolution::{Evolution, Warning};
use crate::measurement::{BasisProbability, Counts, MeasurementResult, Sampler, probabilities};
use crate::statevector::AmplitudeEntry;

/// Everything a front end needs to display one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Final amplitudes before measurement.
    pub amplitudes: Vec<AmplitudeEntry>,
    /// Born-rule probability of each basis state.
    pub probabilities: Vec<BasisProbability>,
    /// One outcome per qubit, ascending qubit order.
    pub measurements: Vec<MeasurementResult>,
    /// Numeric warnings raised during evolution.
    pub warnings: Vec<Warning>,
}

/// Histogram of repeated measurements of one evolved state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleResult {
    /// Outcome counts keyed by bitstring.
    pub counts: Counts,
    /// Number of shots taken.
    pub shots: u32,
    /// Numeric warnings raised during evolution.
    pub warnings: Vec<Warning>,
}

/// Stateless simulator combining evolution and measurement.
#[derive(Debug, Clone)]
pub struct Simulator {
    config: EngineConfig,
    evolution: Evolution,
    sampler: Sampler,
}

impl Simulator {
    /// Create a simulator with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        let evolution = Evolution::new(&config);
        let sampler = Sampler::new(&config.numerics);
        Self {
            config,
            evolution,
            sampler,
        }
    }

    /// Configuration in effect.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evolve and measure every qubit once.
    ///
    /// With `Some(seed)` the measurements are reproducible; `None` draws
    /// from OS entropy.
    #[instrument(skip(self, circuit), fields(qubits = circuit.qubit_count(), gates = circuit.len()))]
    pub fn run(&self, circuit: &Circuit, seed: Option<u64>) -> SimResult<RunResult> {
        let mut rng = rng_from(seed);
        self.run_with_rng(circuit, &mut rng)
    }

    /// Evolve and measure using a caller-supplied random source.
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        circuit: &Circuit,
        rng: &mut R,
    ) -> SimResult<RunResult> {
        let evolved = self.evolution.run(circuit)?;

        let amplitudes = evolved.state.entries();
        let probabilities = probabilities(&evolved.state);

        let mut collapsed = evolved.state;
        let measurements = self.sampler.measure_all(&mut collapsed, rng)?;

        info!(
            "Run complete: {} measurements, {} warnings",
            measurements.len(),
            evolved.warnings.len()
        );

        Ok(RunResult {
            amplitudes,
            probabilities,
            measurements,
            warnings: evolved.warnings,
        })
    }

    /// Evolve once and measure `shots` independent copies.
    #[instrument(skip(self, circuit), fields(qubits = circuit.qubit_count()))]
    pub fn sample(&self, circuit: &Circuit, shots: u32, seed: Option<u64>) -> SimResult<SampleResult> {
        let evolved = self.evolution.run(circuit)?;
        let mut rng = rng_from(seed);
        let counts = self.sampler.sample_counts(&evolved.state, shots, &mut rng)?;

        info!("Sampling complete: {} shots, {} outcomes", shots, counts.len());

        Ok(SampleResult {
            counts,
            shots,
            warnings: evolved.warnings,
        })
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
