//! Qsim Circuit Model
//!
//! This crate provides the data structures for describing quantum circuits in
//! Qsim: qubit indices, the fixed gate set, the mutable [`Circuit`] and the
//! serializable [`CircuitDescription`] used to save and share circuits.
//!
//! A circuit never holds amplitudes. Running one is the job of
//! `qsim-engine`.
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qsim_ir::{Circuit, GateKind, QubitIndex};
//!
//! let mut circuit = Circuit::new(2).unwrap();
//! circuit.h(QubitIndex(0)).unwrap();
//! let cnot = circuit
//!     .add_gate(GateKind::Cnot, QubitIndex(1), Some(QubitIndex(0)))
//!     .unwrap();
//!
//! assert_eq!(circuit.len(), 2);
//! circuit.remove_gate(cnot).unwrap();
//! assert_eq!(circuit.len(), 1);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `CNOT` | 2 | Controlled-NOT |

pub mod circuit;
pub mod description;
pub mod error;
pub mod gate;
pub mod qubit;

pub use circuit::{Circuit, DEFAULT_MAX_QUBITS, MAX_SUPPORTED_QUBITS};
pub use description::{CircuitDescription, GateSpec};
pub use error::{IrError, IrResult};
pub use gate::{Gate, GateId, GateKind};
pub use qubit::QubitIndex;
