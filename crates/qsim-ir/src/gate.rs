//! Quantum gate types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{IrError, IrResult};
use crate::qubit::QubitIndex;

/// The fixed gate set supported by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Controlled-X gate.
    #[serde(rename = "CNOT", alias = "CX")]
    Cnot,
}

impl GateKind {
    /// All supported kinds, in display order.
    pub const ALL: [GateKind; 5] = [
        GateKind::H,
        GateKind::X,
        GateKind::Y,
        GateKind::Z,
        GateKind::Cnot,
    ];

    /// Get the canonical name of this gate.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            GateKind::H => "H",
            GateKind::X => "X",
            GateKind::Y => "Y",
            GateKind::Z => "Z",
            GateKind::Cnot => "CNOT",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(self) -> u32 {
        match self {
            GateKind::H | GateKind::X | GateKind::Y | GateKind::Z => 1,
            GateKind::Cnot => 2,
        }
    }

    /// Whether the gate takes a control qubit.
    #[inline]
    pub fn is_controlled(self) -> bool {
        matches!(self, GateKind::Cnot)
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GateKind {
    type Err = IrError;

    fn from_str(s: &str) -> IrResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" => Ok(GateKind::H),
            "x" => Ok(GateKind::X),
            "y" => Ok(GateKind::Y),
            "z" => Ok(GateKind::Z),
            "cnot" | "cx" => Ok(GateKind::Cnot),
            _ => Err(IrError::UnknownGateKind(s.to_string())),
        }
    }
}

/// Stable identifier of a gate within its circuit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GateId(pub u64);

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// A gate application stored in a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    /// Identifier assigned by the owning circuit.
    pub id: GateId,
    /// The kind of gate.
    pub kind: GateKind,
    /// Qubit the gate acts on.
    pub target: QubitIndex,
    /// Control qubit, present only for CNOT.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control: Option<QubitIndex>,
}

impl Gate {
    /// Check gate operands against a circuit of `qubit_count` qubits.
    ///
    /// Range errors are reported before structural ones, so an out-of-range
    /// control on a single-qubit gate is an `InvalidQubitIndex`.
    pub fn validate(
        kind: GateKind,
        target: QubitIndex,
        control: Option<QubitIndex>,
        qubit_count: u32,
    ) -> IrResult<()> {
        for qubit in std::iter::once(target).chain(control) {
            if !qubit.is_within(qubit_count) {
                return Err(IrError::InvalidQubitIndex {
                    qubit,
                    qubit_count,
                    gate: kind,
                });
            }
        }

        match (kind.is_controlled(), control) {
            (true, None) => Err(IrError::InvalidGateSpec {
                gate: kind,
                reason: "a control qubit is required",
            }),
            (false, Some(_)) => Err(IrError::InvalidGateSpec {
                gate: kind,
                reason: "only CNOT takes a control qubit",
            }),
            (true, Some(c)) if c == target => Err(IrError::InvalidGateSpec {
                gate: kind,
                reason: "control and target must be different qubits",
            }),
            _ => Ok(()),
        }
    }

    /// Qubits touched by this gate, control first.
    pub fn qubits(&self) -> impl Iterator<Item = QubitIndex> + '_ {
        self.control.into_iter().chain(std::iter::once(self.target))
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.control {
            Some(control) => write!(f, "{} {}, {}", self.kind, control, self.target),
            None => write!(f, "{} {}", self.kind, self.target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_kind_properties() {
        assert_eq!(GateKind::H.num_qubits(), 1);
        assert_eq!(GateKind::Cnot.num_qubits(), 2);
        assert!(GateKind::Cnot.is_controlled());
        assert!(!GateKind::Y.is_controlled());
    }

    #[test]
    fn test_parse_gate_kind() {
        assert_eq!("h".parse::<GateKind>().unwrap(), GateKind::H);
        assert_eq!("CNOT".parse::<GateKind>().unwrap(), GateKind::Cnot);
        assert_eq!(" cx ".parse::<GateKind>().unwrap(), GateKind::Cnot);
        assert!(matches!(
            "rx".parse::<GateKind>(),
            Err(IrError::UnknownGateKind(_))
        ));
    }

    #[test]
    fn test_gate_kind_serde_names() {
        assert_eq!(serde_json::to_string(&GateKind::Cnot).unwrap(), "\"CNOT\"");
        assert_eq!(serde_json::to_string(&GateKind::H).unwrap(), "\"H\"");
        let cx: GateKind = serde_json::from_str("\"CX\"").unwrap();
        assert_eq!(cx, GateKind::Cnot);
    }

    #[test]
    fn test_validate_ranges() {
        assert!(Gate::validate(GateKind::H, QubitIndex(1), None, 2).is_ok());
        assert!(matches!(
            Gate::validate(GateKind::H, QubitIndex(5), None, 2),
            Err(IrError::InvalidQubitIndex { qubit: QubitIndex(5), .. })
        ));
        assert!(matches!(
            Gate::validate(GateKind::Cnot, QubitIndex(0), Some(QubitIndex(2)), 2),
            Err(IrError::InvalidQubitIndex { qubit: QubitIndex(2), .. })
        ));
    }

    #[test]
    fn test_validate_control_rules() {
        assert!(matches!(
            Gate::validate(GateKind::Cnot, QubitIndex(0), Some(QubitIndex(0)), 2),
            Err(IrError::InvalidGateSpec { .. })
        ));
        assert!(matches!(
            Gate::validate(GateKind::Cnot, QubitIndex(1), None, 2),
            Err(IrError::InvalidGateSpec { .. })
        ));
        assert!(matches!(
            Gate::validate(GateKind::X, QubitIndex(1), Some(QubitIndex(0)), 2),
            Err(IrError::InvalidGateSpec { .. })
        ));
    }

    #[test]
    fn test_gate_display() {
        let gate = Gate {
            id: GateId(3),
            kind: GateKind::Cnot,
            target: QubitIndex(1),
            control: Some(QubitIndex(0)),
        };
        assert_eq!(gate.to_string(), "CNOT q0, q1");
        assert_eq!(gate.qubits().collect::<Vec<_>>(), vec![QubitIndex(0), QubitIndex(1)]);
    }
}
