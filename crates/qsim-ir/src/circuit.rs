//! High-level circuit builder API.

use crate::description::{CircuitDescription, GateSpec};
use crate::error::{IrError, IrResult};
use crate::gate::{Gate, GateId, GateKind};
use crate::qubit::QubitIndex;

/// Default ceiling on the qubit count of a circuit.
pub const DEFAULT_MAX_QUBITS: u32 = 20;

/// Hard upper bound for any configured ceiling.
pub const MAX_SUPPORTED_QUBITS: u32 = 30;

/// A quantum circuit: a fixed register of qubits and an ordered gate list.
///
/// The circuit is a pure description. It never holds amplitudes; running it
/// is the simulator's job. Every mutation is validated up front and a failed
/// call leaves the circuit untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    /// Number of qubits, fixed at construction.
    qubit_count: u32,
    /// Ceiling the qubit count was checked against.
    ceiling: u32,
    /// Gates in application order.
    gates: Vec<Gate>,
    /// Counter for generating gate ids.
    next_gate_id: u64,
}

impl Circuit {
    /// Create an empty circuit checked against [`DEFAULT_MAX_QUBITS`].
    pub fn new(qubit_count: u32) -> IrResult<Self> {
        Self::with_ceiling(qubit_count, DEFAULT_MAX_QUBITS)
    }

    /// Create an empty circuit checked against an explicit ceiling.
    ///
    /// The ceiling itself is clamped to [`MAX_SUPPORTED_QUBITS`].
    pub fn with_ceiling(qubit_count: u32, ceiling: u32) -> IrResult<Self> {
        let ceiling = ceiling.min(MAX_SUPPORTED_QUBITS);
        if qubit_count < 1 || qubit_count > ceiling {
            return Err(IrError::InvalidQubitCount {
                count: qubit_count,
                max: ceiling,
            });
        }
        Ok(Self {
            qubit_count,
            ceiling,
            gates: vec![],
            next_gate_id: 0,
        })
    }

    /// Rebuild a circuit from its wire format.
    ///
    /// Every gate goes through [`Circuit::add_gate`], so a description that
    /// breaks any invariant is rejected.
    pub fn from_description(description: &CircuitDescription, ceiling: u32) -> IrResult<Self> {
        let mut circuit = Self::with_ceiling(description.qubit_count, ceiling)?;
        for spec in &description.gates {
            circuit.add_gate(spec.kind, spec.target, spec.control)?;
        }
        Ok(circuit)
    }

    /// Export the qubit count and ordered gate list.
    pub fn to_description(&self) -> CircuitDescription {
        CircuitDescription {
            qubit_count: self.qubit_count,
            gates: self.gates.iter().map(GateSpec::from).collect(),
        }
    }

    /// Append a gate after validating it against this circuit.
    pub fn add_gate(
        &mut self,
        kind: GateKind,
        target: QubitIndex,
        control: Option<QubitIndex>,
    ) -> IrResult<GateId> {
        Gate::validate(kind, target, control, self.qubit_count)?;

        let id = GateId(self.next_gate_id);
        self.next_gate_id += 1;
        self.gates.push(Gate {
            id,
            kind,
            target,
            control,
        });
        Ok(id)
    }

    /// Remove the gate with the given id, keeping the order of the rest.
    pub fn remove_gate(&mut self, id: GateId) -> IrResult<Gate> {
        let position = self
            .gates
            .iter()
            .position(|g| g.id == id)
            .ok_or(IrError::GateNotFound(id))?;
        Ok(self.gates.remove(position))
    }

    /// Remove the gate at `position` in application order.
    pub fn remove_gate_at(&mut self, position: usize) -> IrResult<Gate> {
        if position >= self.gates.len() {
            return Err(IrError::GatePositionOutOfRange {
                position,
                len: self.gates.len(),
            });
        }
        Ok(self.gates.remove(position))
    }

    /// Remove all gates. The qubit count is kept and ids are not reused.
    pub fn clear(&mut self) {
        self.gates.clear();
    }

    // =========================================================================
    // Gate shorthands
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitIndex) -> IrResult<&mut Self> {
        self.add_gate(GateKind::H, qubit, None)?;
        Ok(self)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitIndex) -> IrResult<&mut Self> {
        self.add_gate(GateKind::X, qubit, None)?;
        Ok(self)
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitIndex) -> IrResult<&mut Self> {
        self.add_gate(GateKind::Y, qubit, None)?;
        Ok(self)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitIndex) -> IrResult<&mut Self> {
        self.add_gate(GateKind::Z, qubit, None)?;
        Ok(self)
    }

    /// Apply CNOT gate.
    pub fn cnot(&mut self, control: QubitIndex, target: QubitIndex) -> IrResult<&mut Self> {
        self.add_gate(GateKind::Cnot, target, Some(control))?;
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the number of qubits.
    pub fn qubit_count(&self) -> u32 {
        self.qubit_count
    }

    /// Get the ceiling the qubit count was validated against.
    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    /// Gates in application order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Look up a gate by id.
    pub fn gate(&self, id: GateId) -> Option<&Gate> {
        self.gates.iter().find(|g| g.id == id)
    }

    /// Number of gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Whether the circuit has no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    // =========================================================================
    // Example circuits
    // =========================================================================

    /// Create a Bell state circuit: H(0), CNOT(0 → 1).
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::new(2)?;
        circuit.h(QubitIndex(0))?.cnot(QubitIndex(0), QubitIndex(1))?;
        Ok(circuit)
    }

    /// Create an n-qubit GHZ state circuit.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::new(n)?;
        circuit.h(QubitIndex(0))?;
        for i in 1..n {
            circuit.cnot(QubitIndex(0), QubitIndex(i))?;
        }
        Ok(circuit)
    }
}
