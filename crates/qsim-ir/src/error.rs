//! Error types for the IR crate.

use crate::gate::{GateId, GateKind};
use crate::qubit::QubitIndex;
use thiserror::Error;

/// Errors that can occur while building or loading a circuit.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit count is zero or above the configured ceiling.
    #[error("Invalid qubit count {count}: must be between 1 and {max}")]
    InvalidQubitCount {
        /// The requested qubit count.
        count: u32,
        /// The ceiling in effect.
        max: u32,
    },

    /// A gate operand lies outside the circuit's qubit range.
    #[error("Qubit {qubit} is out of range for a {qubit_count}-qubit circuit (gate: {gate})")]
    InvalidQubitIndex {
        /// The offending qubit.
        qubit: QubitIndex,
        /// Number of qubits in the circuit.
        qubit_count: u32,
        /// The gate being added.
        gate: GateKind,
    },

    /// Gate operands are structurally invalid for the gate kind.
    #[error("Invalid {gate} gate: {reason}")]
    InvalidGateSpec {
        /// The gate being added.
        gate: GateKind,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// No gate with this id exists in the circuit.
    #[error("Gate {0} not found in circuit")]
    GateNotFound(GateId),

    /// Position-based removal past the end of the gate list.
    #[error("Gate position {position} out of range (circuit has {len} gates)")]
    GatePositionOutOfRange {
        /// Requested position.
        position: usize,
        /// Number of gates in the circuit.
        len: usize,
    },

    /// Gate name that does not match any supported kind.
    #[error("Unknown gate kind '{0}' (expected one of H, X, Y, Z, CNOT)")]
    UnknownGateKind(String),

    /// Circuit description could not be encoded or decoded.
    #[error("Circuit description error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for IrError {
    fn from(err: serde_json::Error) -> Self {
        IrError::Serialization(err.to_string())
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
