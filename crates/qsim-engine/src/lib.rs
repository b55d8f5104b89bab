//! Qsim Statevector Engine
//!
//! This crate runs circuits from `qsim-ir` by exact statevector simulation:
//! amplitudes are evolved gate by gate and then sampled by the Born rule.
//!
//! # Features
//!
//! - **Exact Evolution**: Dense amplitude array, no stochastic approximation
//! - **Seeded Measurement**: Every random draw comes from a caller-supplied RNG
//! - **Numeric Guarding**: Norm drift is renormalized and reported as a warning
//! - **Parallel Kernels**: Optional rayon kernels for large states (`parallel`)
//!
//! # Memory
//!
//! | Qubits | Amplitudes | Memory |
//! |--------|------------|--------|
//! | 10 | 1 024 | ~16 KB |
//! | 15 | 32 768 | ~512 KB |
//! | 20 | 1 048 576 | ~16 MB |
//!
//! The default amplitude ceiling is 2^20; raise it in [`EngineConfig`].
//!
//! # Example
//!
//! ```rust
//! use qsim_engine::{GateKind, QubitIndex, Workbench};
//!
//! let mut bench = Workbench::default();
//! let bell = bench.create_circuit(2).unwrap();
//! bench.add_gate(bell, GateKind::H, QubitIndex(0), None).unwrap();
//! bench
//!     .add_gate(bell, GateKind::Cnot, QubitIndex(1), Some(QubitIndex(0)))
//!     .unwrap();
//!
//! let result = bench.run_circuit(bell, 42).unwrap();
//! assert_eq!(result.measurements[0].outcome, result.measurements[1].outcome);
//! ```

pub mod config;
pub mod error;
pub mod evolution;
pub mod gates;
pub mod measurement;
pub mod simulator;
pub mod statevector;
pub mod workbench;

pub use config::{ConfigError, EngineConfig};
pub use error::{SimError, SimResult};
pub use evolution::{Evolution, Evolved, Warning};
pub use gates::Parallelism;
pub use measurement::{BasisProbability, Counts, MeasurementResult, Outcome, Sampler};
pub use simulator::{RunResult, SampleResult, Simulator};
pub use statevector::{AmplitudeEntry, Statevector};
pub use workbench::{CircuitHandle, Workbench};

pub use qsim_ir::{Circuit, CircuitDescription, GateId, GateKind, QubitIndex};
