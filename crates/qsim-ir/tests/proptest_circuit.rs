//! Property-based tests for circuit mutation and the description format.

use proptest::prelude::*;
use qsim_ir::{Circuit, CircuitDescription, GateKind, IrError, QubitIndex};

fn arb_kind() -> impl Strategy<Value = GateKind> {
    prop::sample::select(GateKind::ALL.to_vec())
}

/// Arbitrary gate request, including out-of-range and malformed operands.
fn arb_request() -> impl Strategy<Value = (GateKind, u32, Option<u32>)> {
    (arb_kind(), 0_u32..8, prop::option::of(0_u32..8))
}

proptest! {
    /// A request either appends exactly one gate or fails and changes nothing.
    #[test]
    fn add_gate_is_all_or_nothing(
        n in 1_u32..=5,
        requests in prop::collection::vec(arb_request(), 1..=20),
    ) {
        let mut circuit = Circuit::new(n).unwrap();
        for (kind, target, control) in requests {
            let before = circuit.clone();
            let result = circuit.add_gate(kind, QubitIndex(target), control.map(QubitIndex));

            let in_range = target < n && control.is_none_or(|c| c < n);
            let well_formed = kind.is_controlled() == control.is_some() && control != Some(target);

            match result {
                Ok(id) => {
                    prop_assert!(in_range && well_formed);
                    prop_assert_eq!(circuit.len(), before.len() + 1);
                    prop_assert_eq!(circuit.gates().last().unwrap().id, id);
                }
                Err(IrError::InvalidQubitIndex { .. }) => {
                    prop_assert!(!in_range);
                    prop_assert_eq!(&circuit, &before);
                }
                Err(IrError::InvalidGateSpec { .. }) => {
                    prop_assert!(in_range && !well_formed);
                    prop_assert_eq!(&circuit, &before);
                }
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }
        }
    }

    /// Saving and reloading a circuit reproduces the gate sequence.
    #[test]
    fn description_preserves_gate_order(
        n in 2_u32..=5,
        requests in prop::collection::vec(arb_request(), 1..=20),
    ) {
        let mut circuit = Circuit::new(n).unwrap();
        for (kind, target, control) in requests {
            let _ = circuit.add_gate(kind, QubitIndex(target), control.map(QubitIndex));
        }

        let json = circuit.to_description().to_json_pretty().unwrap();
        let reloaded = CircuitDescription::from_json(&json)
            .unwrap()
            .into_circuit(n)
            .unwrap();

        prop_assert_eq!(reloaded.qubit_count(), circuit.qubit_count());
        let original: Vec<_> = circuit.gates().iter().map(|g| (g.kind, g.target, g.control)).collect();
        let restored: Vec<_> = reloaded.gates().iter().map(|g| (g.kind, g.target, g.control)).collect();
        prop_assert_eq!(original, restored);
    }
}
