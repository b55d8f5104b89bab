//! Serializable circuit description.
//!
//! This is the format circuits are saved, shared and loaded in:
//!
//! ```json
//! {
//!   "qubit_count": 2,
//!   "gates": [
//!     { "kind": "H", "target": 0 },
//!     { "kind": "CNOT", "target": 1, "control": 0 }
//!   ]
//! }
//! ```
//!
//! Gate ids are assigned by the circuit on load and are not persisted.

use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::error::IrResult;
use crate::gate::{Gate, GateKind};
use crate::qubit::QubitIndex;

/// One gate entry in a [`CircuitDescription`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSpec {
    /// The kind of gate.
    pub kind: GateKind,
    /// Target qubit.
    pub target: QubitIndex,
    /// Control qubit for CNOT.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<QubitIndex>,
}

impl GateSpec {
    /// A single-qubit gate entry.
    pub fn single(kind: GateKind, target: u32) -> Self {
        Self {
            kind,
            target: QubitIndex(target),
            control: None,
        }
    }

    /// A CNOT entry.
    pub fn cnot(control: u32, target: u32) -> Self {
        Self {
            kind: GateKind::Cnot,
            target: QubitIndex(target),
            control: Some(QubitIndex(control)),
        }
    }
}

impl From<&Gate> for GateSpec {
    fn from(gate: &Gate) -> Self {
        Self {
            kind: gate.kind,
            target: gate.target,
            control: gate.control,
        }
    }
}

/// Qubit count plus ordered gate list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitDescription {
    /// Number of qubits in the register.
    pub qubit_count: u32,
    /// Gates in application order.
    #[serde(default)]
    pub gates: Vec<GateSpec>,
}

impl CircuitDescription {
    /// Parse a description from JSON text.
    ///
    /// This only checks the shape of the document. Use
    /// [`Circuit::from_description`] to validate the gates.
    pub fn from_json(source: &str) -> IrResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Encode as indented JSON.
    pub fn to_json_pretty(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate against `ceiling` and build the circuit.
    pub fn into_circuit(&self, ceiling: u32) -> IrResult<Circuit> {
        Circuit::from_description(self, ceiling)
    }
}

impl From<&Circuit> for CircuitDescription {
    fn from(circuit: &Circuit) -> Self {
        circuit.to_description()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::DEFAULT_MAX_QUBITS;
    use crate::error::IrError;

    #[test]
    fn test_parse_bell_description() {
        let json = r#"{
            "qubit_count": 2,
            "gates": [
                { "kind": "H", "target": 0 },
                { "kind": "CNOT", "target": 1, "control": 0 }
            ]
        }"#;
        let desc = CircuitDescription::from_json(json).unwrap();
        assert_eq!(desc.qubit_count, 2);
        assert_eq!(
            desc.gates,
            vec![GateSpec::single(GateKind::H, 0), GateSpec::cnot(0, 1)]
        );

        let circuit = desc.into_circuit(DEFAULT_MAX_QUBITS).unwrap();
        assert_eq!(circuit.len(), 2);
    }

    #[test]
    fn test_missing_gates_means_empty_circuit() {
        let desc = CircuitDescription::from_json(r#"{ "qubit_count": 3 }"#).unwrap();
        assert!(desc.gates.is_empty());
    }

    #[test]
    fn test_single_qubit_gates_omit_control() {
        let desc = CircuitDescription {
            qubit_count: 1,
            gates: vec![GateSpec::single(GateKind::Y, 0)],
        };
        let json = serde_json::to_string(&desc).unwrap();
        assert_eq!(json, r#"{"qubit_count":1,"gates":[{"kind":"Y","target":0}]}"#);
    }

    #[test]
    fn test_invalid_gate_rejected_on_load() {
        let desc = CircuitDescription {
            qubit_count: 2,
            gates: vec![GateSpec::cnot(1, 1)],
        };
        assert!(matches!(
            desc.into_circuit(DEFAULT_MAX_QUBITS),
            Err(IrError::InvalidGateSpec { .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            CircuitDescription::from_json(r#"{ "gates": [] }"#),
            Err(IrError::Serialization(_))
        ));
        assert!(matches!(
            CircuitDescription::from_json(r#"{ "qubit_count": 1, "gates": [{ "kind": "RX", "target": 0 }] }"#),
            Err(IrError::Serialization(_))
        ));
    }
}
