//! Complex amplitude store.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// A statevector representing a quantum state.
///
/// Bit `i` of an amplitude's index is the value of qubit `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: u32,
}

/// One amplitude in a result listing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmplitudeEntry {
    /// Basis-state index.
    pub basis_index: usize,
    /// Real part.
    pub re: f64,
    /// Imaginary part.
    pub im: f64,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    ///
    /// Size admission is the caller's responsibility; see
    /// [`Evolution::run`](crate::evolution::Evolution::run).
    pub fn new(num_qubits: u32) -> Self {
        let size = 1usize << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Wrap an existing amplitude vector.
    ///
    /// The length must be a power of two and at least 2. Normalization is not
    /// enforced; call [`Statevector::normalize`] if needed.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> SimResult<Self> {
        let len = amplitudes.len();
        if len < 2 || !len.is_power_of_two() {
            return Err(SimError::InvalidStateLength(len));
        }
        Ok(Self {
            amplitudes,
            num_qubits: len.trailing_zeros(),
        })
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Dimension of the state space: 2^n.
    #[inline]
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    /// Always false; a statevector has at least two amplitudes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Amplitudes in basis-index order.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Mutable access for gate kernels and collapse.
    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex64] {
        &mut self.amplitudes
    }

    /// Amplitude of one basis state.
    pub fn amplitude(&self, index: usize) -> Option<Complex64> {
        self.amplitudes.get(index).copied()
    }

    /// Probability of measuring basis state `index`: |αᵢ|².
    pub fn probability(&self, index: usize) -> f64 {
        self.amplitudes.get(index).map_or(0.0, |a| a.norm_sqr())
    }

    /// Σ|αᵢ|², which is 1 for a normalized state.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Rescale to unit norm and return the squared norm before rescaling.
    ///
    /// A zero or non-finite norm leaves the amplitudes untouched.
    pub fn normalize(&mut self) -> f64 {
        let norm_sq = self.norm_sqr();
        if norm_sq > 0.0 && norm_sq.is_finite() {
            let inv = 1.0 / norm_sq.sqrt();
            for amp in &mut self.amplitudes {
                *amp *= inv;
            }
        }
        norm_sq
    }

    /// Amplitudes as plain `(index, re, im)` records.
    pub fn entries(&self) -> Vec<AmplitudeEntry> {
        self.amplitudes
            .iter()
            .enumerate()
            .map(|(basis_index, a)| AmplitudeEntry {
                basis_index,
                re: a.re,
                im: a.im,
            })
            .collect()
    }

    /// Ket label of a basis state of this register, e.g. `|011⟩`.
    pub fn basis_label(&self, index: usize) -> String {
        basis_label(index, self.num_qubits)
    }

    /// Consume the statevector and return its amplitudes.
    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }
}

/// Ket label of basis state `index` in an `num_qubits` register.
///
/// The highest qubit is written first, so qubit 0 is the rightmost digit.
pub fn basis_label(index: usize, num_qubits: u32) -> String {
    format!("|{}⟩", bitstring(index, num_qubits))
}

/// Bits of `index`, highest qubit first.
pub fn bitstring(index: usize, num_qubits: u32) -> String {
    format!("{:0width$b}", index, width = num_qubits as usize)
}
