//! Handle-based workbench for interactive front ends.
//!
//! A front end never owns circuits directly. It asks the workbench for a
//! [`CircuitHandle`], edits the circuit through it, and runs it with a seed.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use uuid::Uuid;

use qsim_ir::{Circuit, CircuitDescription, GateId, GateKind, QubitIndex};

use crate::config::EngineConfig;
use crate::error::{SimError, SimResult};
use crate::simulator::{RunResult, Simulator};

/// Opaque reference to a circuit held by a [`Workbench`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CircuitHandle(Uuid);

impl CircuitHandle {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for CircuitHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owns circuits behind handles and runs them.
#[derive(Debug)]
pub struct Workbench {
    circuits: FxHashMap<CircuitHandle, Circuit>,
    simulator: Simulator,
}

impl Workbench {
    /// Create an empty workbench.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            circuits: FxHashMap::default(),
            simulator: Simulator::new(config),
        }
    }

    /// Configuration in effect.
    pub fn config(&self) -> &EngineConfig {
        self.simulator.config()
    }

    /// Create an empty circuit of `qubit_count` qubits.
    pub fn create_circuit(&mut self, qubit_count: u32) -> SimResult<CircuitHandle> {
        let circuit = Circuit::with_ceiling(qubit_count, self.config().limits.max_qubits)?;
        Ok(self.insert(circuit))
    }

    /// Append a gate to a circuit.
    pub fn add_gate(
        &mut self,
        handle: CircuitHandle,
        kind: GateKind,
        target: QubitIndex,
        control: Option<QubitIndex>,
    ) -> SimResult<GateId> {
        Ok(self.circuit_mut(handle)?.add_gate(kind, target, control)?)
    }

    /// Remove a gate by id.
    pub fn remove_gate(&mut self, handle: CircuitHandle, gate: GateId) -> SimResult<()> {
        self.circuit_mut(handle)?.remove_gate(gate)?;
        Ok(())
    }

    /// Drop every gate of a circuit, keeping its qubit count.
    pub fn reset_circuit(&mut self, handle: CircuitHandle) -> SimResult<()> {
        self.circuit_mut(handle)?.clear();
        Ok(())
    }

    /// Evolve a circuit from |0...0⟩ and measure every qubit.
    pub fn run_circuit(&self, handle: CircuitHandle, seed: u64) -> SimResult<RunResult> {
        let circuit = self.circuit(handle)?;
        self.simulator.run(circuit, Some(seed))
    }

    /// Load a circuit from its description.
    pub fn import_circuit(&mut self, description: &CircuitDescription) -> SimResult<CircuitHandle> {
        let circuit = description.into_circuit(self.config().limits.max_qubits)?;
        Ok(self.insert(circuit))
    }

    /// Snapshot a circuit as a description.
    pub fn export_circuit(&self, handle: CircuitHandle) -> SimResult<CircuitDescription> {
        Ok(self.circuit(handle)?.to_description())
    }

    /// Forget a circuit. Its handle becomes invalid.
    pub fn close_circuit(&mut self, handle: CircuitHandle) -> SimResult<()> {
        if self.circuits.remove(&handle).is_none() {
            return Err(SimError::UnknownCircuit(handle));
        }
        debug!("Closed circuit {}", handle);
        Ok(())
    }

    /// Borrow a circuit.
    pub fn circuit(&self, handle: CircuitHandle) -> SimResult<&Circuit> {
        self.circuits
            .get(&handle)
            .ok_or(SimError::UnknownCircuit(handle))
    }

    /// Number of open circuits.
    pub fn len(&self) -> usize {
        self.circuits.len()
    }

    /// Whether no circuits are open.
    pub fn is_empty(&self) -> bool {
        self.circuits.is_empty()
    }

    fn circuit_mut(&mut self, handle: CircuitHandle) -> SimResult<&mut Circuit> {
        self.circuits
            .get_mut(&handle)
            .ok_or(SimError::UnknownCircuit(handle))
    }

    fn insert(&mut self, circuit: Circuit) -> CircuitHandle {
        let handle = CircuitHandle::new();
        debug!(
            "Opened circuit {} ({} qubits, {} gates)",
            handle,
            circuit.qubit_count(),
            circuit.len()
        );
        self.circuits.insert(handle, circuit);
        handle
    }
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
