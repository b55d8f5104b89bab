//! Measurement sampler: Born-rule sampling with collapse.
//!
//! The random source is always supplied by the caller. Seeding it (for
//! example with `StdRng::seed_from_u64`) makes every outcome reproducible.

use num_complex::Complex64;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

use qsim_ir::QubitIndex;

use crate::config::Numerics;
use crate::error::{SimError, SimResult};
use crate::statevector::{Statevector, basis_label, bitstring};

/// Result of measuring one qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Outcome {
    /// The qubit was found in |0⟩.
    Zero,
    /// The qubit was found in |1⟩.
    One,
}

impl Outcome {
    /// Outcome as a bit value.
    pub fn bit(self) -> u8 {
        match self {
            Outcome::Zero => 0,
            Outcome::One => 1,
        }
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> Self {
        outcome.bit()
    }
}

impl TryFrom<u8> for Outcome {
    type Error = String;

    fn try_from(bit: u8) -> Result<Self, Self::Error> {
        match bit {
            0 => Ok(Outcome::Zero),
            1 => Ok(Outcome::One),
            other => Err(format!("measurement outcome must be 0 or 1, got {other}")),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bit())
    }
}

/// Outcome of one qubit in a joint measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementResult {
    /// The measured qubit.
    pub qubit: QubitIndex,
    /// What was observed.
    pub outcome: Outcome,
}

/// Probability of one basis state, for visualization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasisProbability {
    /// Basis-state index.
    pub basis_index: usize,
    /// Ket label, highest qubit first.
    pub label: String,
    /// |α|².
    pub probability: f64,
}

/// Shot histogram keyed by bitstring (highest qubit first).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts(BTreeMap<String, u64>);

impl Counts {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of a bitstring.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.0.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Occurrences of a bitstring.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of recorded shots.
    pub fn total_shots(&self) -> u64 {
        self.0.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Outcomes by descending count, ties in bitstring order.
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Iterate in bitstring order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.0.iter()
    }
}

/// Samples measurement outcomes from a statevector.
#[derive(Debug, Clone)]
pub struct Sampler {
    degenerate_epsilon: f64,
}

impl Sampler {
    /// Create a sampler with the given numeric settings.
    pub fn new(numerics: &Numerics) -> Self {
        Self {
            degenerate_epsilon: numerics.degenerate_epsilon,
        }
    }

    /// Marginal probabilities `(p0, p1)` of one qubit.
    pub fn marginals(&self, state: &Statevector, qubit: QubitIndex) -> SimResult<(f64, f64)> {
        check_qubit(state, qubit)?;
        let mask = qubit.mask();
        let (mut p0, mut p1) = (0.0, 0.0);
        for (i, a) in state.amplitudes().iter().enumerate() {
            if i & mask == 0 {
                p0 += a.norm_sqr();
            } else {
                p1 += a.norm_sqr();
            }
        }
        Ok((p0, p1))
    }

    /// Measure one qubit, collapsing `state` onto the observed outcome.
    ///
    /// An outcome whose probability is numerically zero is re-sampled once;
    /// a second degenerate draw is a [`SimError::DegenerateMeasurement`].
    pub fn measure<R: Rng + ?Sized>(
        &self,
        state: &mut Statevector,
        qubit: QubitIndex,
        rng: &mut R,
    ) -> SimResult<Outcome> {
        let (p0, p1) = self.marginals(state, qubit)?;

        let mut attempt = 0;
        let (outcome, probability) = loop {
            let r: f64 = rng.r#gen();
            let drawn = if r < p1 {
                (Outcome::One, p1)
            } else {
                (Outcome::Zero, p0)
            };
            if drawn.1 >= self.degenerate_epsilon {
                break drawn;
            }
            attempt += 1;
            if attempt > 1 {
                return Err(SimError::DegenerateMeasurement {
                    qubit: qubit.0,
                    probability: drawn.1,
                });
            }
            warn!(qubit = qubit.0, p = drawn.1, "Degenerate measurement; re-sampling");
        };

        collapse(state, qubit, outcome, probability);
        debug!("Measured {} = {} (p = {:.6})", qubit, outcome, probability);
        Ok(outcome)
    }

    /// Measure every qubit in ascending index order.
    ///
    /// Each collapse is applied before the next qubit is measured, so joint
    /// statistics of entangled states are preserved.
    pub fn measure_all<R: Rng + ?Sized>(
        &self,
        state: &mut Statevector,
        rng: &mut R,
    ) -> SimResult<Vec<MeasurementResult>> {
        (0..state.num_qubits())
            .map(QubitIndex)
            .map(|qubit| {
                self.measure(state, qubit, rng)
                    .map(|outcome| MeasurementResult { qubit, outcome })
            })
            .collect()
    }

    /// Repeatedly measure copies of `state` and histogram the results.
    pub fn sample_counts<R: Rng + ?Sized>(
        &self,
        state: &Statevector,
        shots: u32,
        rng: &mut R,
    ) -> SimResult<Counts> {
        let mut counts = Counts::new();
        for _ in 0..shots {
            let mut shot = state.clone();
            let results = self.measure_all(&mut shot, rng)?;
            counts.insert(bitstring(joint_index(&results), state.num_qubits()), 1);
        }
        Ok(counts)
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(&Numerics::default())
    }
}

/// Probability table over every basis state.
pub fn probabilities(state: &Statevector) -> Vec<BasisProbability> {
    state
        .amplitudes()
        .iter()
        .enumerate()
        .map(|(basis_index, a)| BasisProbability {
            basis_index,
            label: basis_label(basis_index, state.num_qubits()),
            probability: a.norm_sqr(),
        })
        .collect()
}

/// Basis index formed by a set of per-qubit outcomes.
pub fn joint_index(results: &[MeasurementResult]) -> usize {
    results
        .iter()
        .filter(|r| r.outcome == Outcome::One)
        .fold(0, |acc, r| acc | r.qubit.mask())
}

fn check_qubit(state: &Statevector, qubit: QubitIndex) -> SimResult<()> {
    if qubit.is_within(state.num_qubits()) {
        Ok(())
    } else {
        Err(SimError::QubitOutOfRange {
            qubit: qubit.0,
            num_qubits: state.num_qubits(),
        })
    }
}

/// Project onto `outcome` and rescale survivors by `1/√probability`.
fn collapse(state: &mut Statevector, qubit: QubitIndex, outcome: Outcome, probability: f64) {
    let mask = qubit.mask();
    let keep_set = outcome == Outcome::One;
    let scale = 1.0 / probability.sqrt();
    for (i, a) in state.amplitudes_mut().iter_mut().enumerate() {
        if (i & mask != 0) == keep_set {
            *a *= scale;
        } else {
            *a = Complex64::new(0.0, 0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// RNG that always yields the same word.
    struct FixedRng(u64);

    impl rand::RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.0 as u32
        }
        fn next_u64(&mut self) -> u64 {
            self.0
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    /// RNG that replays a fixed word sequence and counts draws.
    struct SeqRng {
        words: Vec<u64>,
        draws: usize,
    }

    impl SeqRng {
        fn new(words: &[u64]) -> Self {
            Self {
                words: words.to_vec(),
                draws: 0,
            }
        }
    }

    impl rand::RngCore for SeqRng {
        fn next_u32(&mut self) -> u32 {
            self.next_u64() as u32
        }
        fn next_u64(&mut self) -> u64 {
            let word = self.words[self.draws];
            self.draws += 1;
            word
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    fn plus_state() -> Statevector {
        let s = std::f64::consts::FRAC_1_SQRT_2;
        Statevector::from_amplitudes(vec![Complex64::new(s, 0.0), Complex64::new(s, 0.0)]).unwrap()
    }

    #[test]
    fn test_ground_state_measures_zero() {
        let sampler = Sampler::default();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let mut state = Statevector::new(2);
            let results = sampler.measure_all(&mut state, &mut rng).unwrap();
            assert!(results.iter().all(|r| r.outcome == Outcome::Zero));
            assert_eq!(state, Statevector::new(2));
        }
    }

    #[test]
    fn test_threshold_rule() {
        let sampler = Sampler::default();

        // r = 0 < p1 = 0.5 → 1
        let mut state = plus_state();
        let outcome = sampler.measure(&mut state, QubitIndex(0), &mut FixedRng(0)).unwrap();
        assert_eq!(outcome, Outcome::One);
        assert!((state.amplitudes()[1].re - 1.0).abs() < 1e-12);
        assert_eq!(state.amplitudes()[0], Complex64::new(0.0, 0.0));

        // r ≈ 1 ≥ p1 → 0
        let mut state = plus_state();
        let outcome = sampler
            .measure(&mut state, QubitIndex(0), &mut FixedRng(u64::MAX))
            .unwrap();
        assert_eq!(outcome, Outcome::Zero);
        assert!((state.norm_sqr() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_collapse_keeps_relative_phase() {
        // (|00⟩ + i|01⟩ + |10⟩)/√3, measure q1 = 0 → (|00⟩ + i|01⟩)/√2
        let t = 1.0 / 3.0_f64.sqrt();
        let mut state = Statevector::from_amplitudes(vec![
            Complex64::new(t, 0.0),
            Complex64::new(0.0, t),
            Complex64::new(t, 0.0),
            Complex64::new(0.0, 0.0),
        ])
        .unwrap();

        let outcome = Sampler::default()
            .measure(&mut state, QubitIndex(1), &mut FixedRng(u64::MAX))
            .unwrap();
        assert_eq!(outcome, Outcome::Zero);

        let s = std::f64::consts::FRAC_1_SQRT_2;
        let amps = state.amplitudes();
        assert!((amps[0] - Complex64::new(s, 0.0)).norm() < 1e-12);
        assert!((amps[1] - Complex64::new(0.0, s)).norm() < 1e-12);
        assert_eq!(amps[2], Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_degenerate_measurement_fails_after_retry() {
        let mut state = Statevector::from_amplitudes(vec![Complex64::new(0.0, 0.0); 2]).unwrap();
        let before = state.clone();
        let err = Sampler::default()
            .measure(&mut state, QubitIndex(0), &mut StdRng::seed_from_u64(3))
            .unwrap_err();
        assert!(matches!(err, SimError::DegenerateMeasurement { qubit: 0, .. }));
        assert_eq!(state, before);
    }

    #[test]
    fn test_degenerate_draw_is_resampled_once() {
        // p1 = 1e-14 is below the degenerate epsilon; r = 0 picks it, r ≈ 1 does not.
        let mut state = Statevector::from_amplitudes(vec![
            Complex64::new((1.0 - 1e-14_f64).sqrt(), 0.0),
            Complex64::new(1e-7, 0.0),
        ])
        .unwrap();
        let mut rng = SeqRng::new(&[0, u64::MAX]);

        let outcome = Sampler::default()
            .measure(&mut state, QubitIndex(0), &mut rng)
            .unwrap();
        assert_eq!(outcome, Outcome::Zero);
        assert_eq!(rng.draws, 2);
        assert!((state.amplitudes()[0] - Complex64::new(1.0, 0.0)).norm() < 1e-12);
        assert_eq!(state.amplitudes()[1], Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_measure_out_of_range() {
        let mut state = Statevector::new(1);
        assert!(matches!(
            Sampler::default().measure(&mut state, QubitIndex(1), &mut FixedRng(0)),
            Err(SimError::QubitOutOfRange { qubit: 1, num_qubits: 1 })
        ));
    }

    #[test]
    fn test_sampling_statistics_of_plus_state() {
        let sampler = Sampler::default();
        let mut rng = StdRng::seed_from_u64(2024);
        let counts = sampler.sample_counts(&plus_state(), 4000, &mut rng).unwrap();

        assert_eq!(counts.total_shots(), 4000);
        let ones = counts.get("1") as f64 / 4000.0;
        assert!((ones - 0.5).abs() < 0.05, "fraction of ones was {ones}");
    }

    #[test]
    fn test_probabilities_table() {
        let table = probabilities(&plus_state());
        assert_eq!(table.len(), 2);
        assert_eq!(table[1].label, "|1⟩");
        assert!((table[0].probability - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_joint_index() {
        let results = [
            MeasurementResult { qubit: QubitIndex(0), outcome: Outcome::One },
            MeasurementResult { qubit: QubitIndex(1), outcome: Outcome::Zero },
            MeasurementResult { qubit: QubitIndex(2), outcome: Outcome::One },
        ];
        assert_eq!(joint_index(&results), 0b101);
    }

    #[test]
    fn test_outcome_serde() {
        assert_eq!(serde_json::to_string(&Outcome::One).unwrap(), "1");
        assert_eq!(serde_json::from_str::<Outcome>("0").unwrap(), Outcome::Zero);
        assert!(serde_json::from_str::<Outcome>("2").is_err());
    }

    #[test]
    fn test_counts_sorted() {
        let mut counts = Counts::new();
        counts.insert("00", 3);
        counts.insert("11", 5);
        counts.insert("00", 4);
        let sorted = counts.sorted();
        assert_eq!(sorted[0], (&"00".to_string(), &7));
        assert_eq!(sorted[1], (&"11".to_string(), &5));
    }

    #[test]
    fn test_counts_iterate_in_bitstring_order() {
        let mut counts = Counts::new();
        counts.insert("11", 9);
        counts.insert("01", 1);
        counts.insert("10", 4);
        let keys: Vec<&str> = counts.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["01", "10", "11"]);
    }
}
