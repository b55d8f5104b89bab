//! Evolution engine: replays a circuit against a fresh statevector.

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, trace, warn};

use qsim_ir::Circuit;

use crate::config::{EngineConfig, Numerics};
use crate::error::{SimError, SimResult};
use crate::gates::{Parallelism, apply_gate};
use crate::statevector::Statevector;

/// Non-fatal conditions observed during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// Norm drift after a gate exceeded the instability threshold.
    NumericInstability {
        /// Position of the gate in the circuit.
        gate_position: usize,
        /// `|Σ|a|² − 1|` observed after the gate.
        drift: f64,
    },
}

/// Final state of an evolution plus anything worth reporting.
#[derive(Debug, Clone)]
pub struct Evolved {
    /// The state after every gate was applied.
    pub state: Statevector,
    /// Numeric warnings, in gate order.
    pub warnings: Vec<Warning>,
}

/// Applies circuits to statevectors.
///
/// Deterministic: the same circuit always produces bit-identical amplitudes.
#[derive(Debug, Clone)]
pub struct Evolution {
    max_amplitudes: u64,
    numerics: Numerics,
    parallelism: Parallelism,
}

impl Evolution {
    /// Create an engine from the engine configuration.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            max_amplitudes: config.limits.max_amplitudes,
            numerics: config.numerics.clone(),
            parallelism: Parallelism::from(&config.parallel),
        }
    }

    /// Override the kernel parallelism.
    #[must_use]
    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Check that a circuit's state fits under the amplitude ceiling.
    pub fn admit(&self, circuit: &Circuit) -> SimResult<()> {
        let qubits = circuit.qubit_count();
        let amplitudes = 1u64.checked_shl(qubits).unwrap_or(u64::MAX);
        if amplitudes > self.max_amplitudes {
            return Err(SimError::CircuitTooLarge {
                qubits,
                amplitudes,
                max_amplitudes: self.max_amplitudes,
            });
        }
        Ok(())
    }

    /// Run the circuit from |0...0⟩.
    pub fn run(&self, circuit: &Circuit) -> SimResult<Evolved> {
        self.admit(circuit)?;

        let start = Instant::now();
        debug!(
            "Starting evolution: {} qubits, {} gates",
            circuit.qubit_count(),
            circuit.len()
        );

        let mut state = Statevector::new(circuit.qubit_count());
        let mut warnings = vec![];

        for (position, gate) in circuit.gates().iter().enumerate() {
            trace!("Applying {} ({})", gate, gate.id);
            apply_gate(&mut state, gate, self.parallelism)?;
            if let Some(warning) = self.stabilize(&mut state, position) {
                warnings.push(warning);
            }
        }

        debug!("Evolution completed in {:?}", start.elapsed());
        Ok(Evolved { state, warnings })
    }

    /// Renormalize after drift and report drift that is too large.
    fn stabilize(&self, state: &mut Statevector, gate_position: usize) -> Option<Warning> {
        let norm_sq = state.norm_sqr();
        let drift = (norm_sq - 1.0).abs();

        if !drift.is_finite() || norm_sq == 0.0 {
            warn!(gate_position, "State norm is {norm_sq}; cannot renormalize");
            return Some(Warning::NumericInstability {
                gate_position,
                drift,
            });
        }
        if drift <= self.numerics.drift_tolerance {
            return None;
        }

        state.normalize();
        if drift > self.numerics.instability_threshold {
            warn!(gate_position, drift, "Numeric instability: renormalized state");
            Some(Warning::NumericInstability {
                gate_position,
                drift,
            })
        } else {
            trace!(gate_position, drift, "Renormalized state");
            None
        }
    }
}

impl Default for Evolution {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
