//! Gate library: unitary kernels over the amplitude array.
//!
//! Every gate in the set acts on pairs of basis states that differ only in
//! the target bit. Splitting the array into chunks of `2 * stride` (where
//! `stride = 1 << target`) puts each pair in the same chunk, with the "0"
//! member in the lower half and the "1" member in the upper half. The chunks
//! are disjoint, which is what lets the `parallel` feature hand them to rayon.
//!
//! Phase convention for Y: `Y = [[0, -i], [i, 0]]`, so `Y|0⟩ = i|1⟩` and
//! `Y|1⟩ = -i|0⟩`.

use num_complex::Complex64;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use qsim_ir::{Gate, GateKind, QubitIndex};

use crate::config::ParallelConfig;
use crate::error::{SimError, SimResult};
use crate::statevector::Statevector;

const I: Complex64 = Complex64::new(0.0, 1.0);

/// When kernels may run in parallel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parallelism {
    enabled: bool,
    threshold: usize,
}

impl Parallelism {
    /// Always run kernels on the calling thread.
    pub const fn sequential() -> Self {
        Self {
            enabled: false,
            threshold: usize::MAX,
        }
    }

    /// Go parallel for states of at least `threshold` amplitudes.
    pub const fn above(threshold: usize) -> Self {
        Self {
            enabled: true,
            threshold,
        }
    }

    /// Whether a state of `len` amplitudes takes the parallel path.
    #[inline]
    pub fn applies_to(self, len: usize) -> bool {
        cfg!(feature = "parallel") && self.enabled && len >= self.threshold
    }
}

impl Default for Parallelism {
    fn default() -> Self {
        Self::from(&ParallelConfig::default())
    }
}

impl From<&ParallelConfig> for Parallelism {
    fn from(config: &ParallelConfig) -> Self {
        Self {
            enabled: config.enabled,
            threshold: config.threshold,
        }
    }
}

/// Apply one circuit gate to the state.
///
/// Every qubit the gate names is range-checked against the state before any
/// amplitude is touched; the kernels below assume this.
pub fn apply_gate(state: &mut Statevector, gate: &Gate, parallelism: Parallelism) -> SimResult<()> {
    let num_qubits = state.num_qubits();
    for qubit in gate.qubits() {
        if !qubit.is_within(num_qubits) {
            return Err(SimError::QubitOutOfRange {
                qubit: qubit.0,
                num_qubits,
            });
        }
    }

    let amps = state.amplitudes_mut();
    match (gate.kind, gate.control) {
        (GateKind::H, _) => apply_h(amps, gate.target, parallelism),
        (GateKind::X, _) => apply_x(amps, gate.target, parallelism),
        (GateKind::Y, _) => apply_y(amps, gate.target, parallelism),
        (GateKind::Z, _) => apply_z(amps, gate.target, parallelism),
        (GateKind::Cnot, Some(control)) => apply_cnot(amps, control, gate.target, parallelism),
        (GateKind::Cnot, None) => {
            return Err(SimError::Ir(qsim_ir::IrError::InvalidGateSpec {
                gate: GateKind::Cnot,
                reason: "a control qubit is required",
            }));
        }
    }
    Ok(())
}

// =========================================================================
// Single-qubit gate implementations
// =========================================================================

/// Hadamard: `(a0, a1) → ((a0 + a1)/√2, (a0 − a1)/√2)`.
pub(crate) fn apply_h(amps: &mut [Complex64], target: QubitIndex, parallelism: Parallelism) {
    let sqrt2_inv = std::f64::consts::FRAC_1_SQRT_2;
    for_each_pair(amps, target, parallelism, |_, a0, a1| {
        let (a, b) = (*a0, *a1);
        *a0 = sqrt2_inv * (a + b);
        *a1 = sqrt2_inv * (a - b);
    });
}

/// Pauli-X: swap each pair.
pub(crate) fn apply_x(amps: &mut [Complex64], target: QubitIndex, parallelism: Parallelism) {
    for_each_pair(amps, target, parallelism, |_, a0, a1| {
        std::mem::swap(a0, a1);
    });
}

/// Pauli-Y: `a0' = −i·a1`, `a1' = i·a0`.
pub(crate) fn apply_y(amps: &mut [Complex64], target: QubitIndex, parallelism: Parallelism) {
    for_each_pair(amps, target, parallelism, |_, a0, a1| {
        let (a, b) = (*a0, *a1);
        *a0 = -I * b;
        *a1 = I * a;
    });
}

/// Pauli-Z: negate amplitudes whose target bit is 1.
pub(crate) fn apply_z(amps: &mut [Complex64], target: QubitIndex, parallelism: Parallelism) {
    for_each_pair(amps, target, parallelism, |_, _, a1| {
        *a1 = -*a1;
    });
}

// =========================================================================
// Two-qubit gate implementations
// =========================================================================

/// CNOT: swap each target pair whose control bit is 1.
pub(crate) fn apply_cnot(
    amps: &mut [Complex64],
    control: QubitIndex,
    target: QubitIndex,
    parallelism: Parallelism,
) {
    let ctrl_mask = control.mask();
    for_each_pair(amps, target, parallelism, |i, a0, a1| {
        if i & ctrl_mask != 0 {
            std::mem::swap(a0, a1);
        }
    });
}

/// Visit every index pair `(i, i | mask)` with the target bit of `i` clear.
///
/// `op` receives the basis index of the "0" member and both amplitudes.
fn for_each_pair<F>(amps: &mut [Complex64], target: QubitIndex, parallelism: Parallelism, op: F)
where
    F: Fn(usize, &mut Complex64, &mut Complex64) + Send + Sync,
{
    let stride = target.mask();
    debug_assert!(stride < amps.len(), "target {target} outside the state");
    let chunk_len = stride * 2;
    let visit = |(chunk_idx, chunk): (usize, &mut [Complex64])| {
        let base = chunk_idx * chunk_len;
        let (lo, hi) = chunk.split_at_mut(stride);
        for (j, (a0, a1)) in lo.iter_mut().zip(hi.iter_mut()).enumerate() {
            op(base + j, a0, a1);
        }
    };

    #[cfg(feature = "parallel")]
    if parallelism.applies_to(amps.len()) {
        amps.par_chunks_mut(chunk_len).enumerate().for_each(visit);
        return;
    }

    #[cfg(not(feature = "parallel"))]
    let _ = parallelism;

    amps.chunks_mut(chunk_len).enumerate().for_each(visit);
}
