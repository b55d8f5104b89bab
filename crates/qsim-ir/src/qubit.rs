//! Qubit index type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a qubit within a circuit's register.
///
/// Qubit `i` corresponds to bit `i` of a basis-state index, so qubit 0 is the
/// least significant bit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct QubitIndex(pub u32);

impl QubitIndex {
    /// Index as a `usize`, for bit arithmetic on basis states.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Single-bit mask selecting this qubit in a basis-state index.
    #[inline]
    pub fn mask(self) -> usize {
        1usize << self.0
    }

    /// Whether this index addresses a qubit of an `n`-qubit register.
    #[inline]
    pub fn is_within(self, qubit_count: u32) -> bool {
        self.0 < qubit_count
    }
}

impl fmt::Display for QubitIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitIndex {
    fn from(index: u32) -> Self {
        QubitIndex(index)
    }
}
