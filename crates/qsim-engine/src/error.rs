//! Error types for the engine crate.

use thiserror::Error;

use crate::workbench::CircuitHandle;

/// Errors produced while evolving or measuring a state.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Circuit construction or mutation failed.
    #[error("Circuit error: {0}")]
    Ir(#[from] qsim_ir::IrError),

    /// The state vector would exceed the amplitude ceiling.
    #[error(
        "Circuit too large: {qubits} qubits need {amplitudes} amplitudes, limit is {max_amplitudes}"
    )]
    CircuitTooLarge {
        /// Qubit count of the circuit.
        qubits: u32,
        /// Amplitudes required (2^qubits).
        amplitudes: u64,
        /// Configured ceiling.
        max_amplitudes: u64,
    },

    /// The sampled outcome has (numerically) zero probability, twice in a row.
    #[error("Degenerate measurement on qubit {qubit}: outcome probability {probability:e}")]
    DegenerateMeasurement {
        /// The qubit being measured.
        qubit: u32,
        /// Probability of the sampled outcome.
        probability: f64,
    },

    /// A qubit index does not exist in the state.
    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit state")]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: u32,
        /// Number of qubits in the state.
        num_qubits: u32,
    },

    /// An amplitude vector whose length is not a power of two (or is < 2).
    #[error("State vector length {0} is not a power of two")]
    InvalidStateLength(usize),

    /// The workbench holds no circuit for this handle.
    #[error("Unknown circuit handle {0}")]
    UnknownCircuit(CircuitHandle),
}

/// Result type for engine operations.
pub type SimResult<T> = Result<T, SimError>;
