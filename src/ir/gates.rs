use serde::{Deserialize, Serialize};

/// Quantum Gate Types
///
/// Gate angles are not stored here; they live in the `params` of
/// [`Operation::Gate`](super::Operation::Gate) so that they can be symbolic.
///
/// # Examples
///
/// ```
/// use qaoa_swap::ir::GateType;
/// assert_eq!(GateType::from_name("rzz"), GateType::RZZ);
/// assert_eq!(GateType::RZZ.num_qubits(), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateType {
    /// Hadamard gate
    H,
    /// Pauli-X gate (NOT)
    X,
    /// Pauli-Y gate
    Y,
    /// Pauli-Z gate
    Z,
    /// Square root of X
    SX,
    /// Controlled-NOT gate
    CX,
    /// Controlled-Z gate
    CZ,
    /// Rotation around X-axis
    RX,
    /// Rotation around Y-axis
    RY,
    /// Rotation around Z-axis
    RZ,
    /// Two-qubit ZZ rotation, the evolution under one cost-operator term
    RZZ,
    /// General unitary gate U(theta, phi, lambda)
    U,
    /// Identity gate (wait)
    ID,
    /// S gate (sqrt(Z))
    S,
    /// S-dagger gate (inverse of S)
    Sdg,
    /// T gate (sqrt(S))
    T,
    /// T-dagger gate (inverse of T)
    Tdg,
    /// Swap gate
    SWAP,
    /// Toffoli gate (CCX)
    CCX,
    /// Custom user-defined gate
    Custom(String),
}

impl GateType {
    /// Maps an OpenQASM gate name to a gate type.
    pub fn from_name(name: &str) -> Self {
        match name {
            "h" => GateType::H,
            "x" => GateType::X,
            "y" => GateType::Y,
            "z" => GateType::Z,
            "sx" => GateType::SX,
            "cx" | "CX" => GateType::CX,
            "cz" => GateType::CZ,
            "rx" => GateType::RX,
            "ry" => GateType::RY,
            "rz" | "u1" => GateType::RZ,
            "rzz" => GateType::RZZ,
            "u3" | "U" | "u" => GateType::U,
            "id" => GateType::ID,
            "s" => GateType::S,
            "sdg" => GateType::Sdg,
            "t" => GateType::T,
            "tdg" => GateType::Tdg,
            "swap" => GateType::SWAP,
            "ccx" => GateType::CCX,
            _ => GateType::Custom(name.to_string()),
        }
    }

    /// Lower-case OpenQASM name, also used as the basis-set key.
    pub fn name(&self) -> &str {
        match self {
            GateType::H => "h",
            GateType::X => "x",
            GateType::Y => "y",
            GateType::Z => "z",
            GateType::SX => "sx",
            GateType::CX => "cx",
            GateType::CZ => "cz",
            GateType::RX => "rx",
            GateType::RY => "ry",
            GateType::RZ => "rz",
            GateType::RZZ => "rzz",
            GateType::U => "u",
            GateType::ID => "id",
            GateType::S => "s",
            GateType::Sdg => "sdg",
            GateType::T => "t",
            GateType::Tdg => "tdg",
            GateType::SWAP => "swap",
            GateType::CCX => "ccx",
            GateType::Custom(name) => name.as_str(),
        }
    }

    /// Number of qubits the gate acts on; `None` for custom gates.
    pub fn num_qubits(&self) -> Option<usize> {
        match self {
            GateType::CX | GateType::CZ | GateType::RZZ | GateType::SWAP => Some(2),
            GateType::CCX => Some(3),
            GateType::Custom(_) => None,
            _ => Some(1),
        }
    }

    /// Number of angle parameters the gate takes; `None` for custom gates.
    pub fn num_params(&self) -> Option<usize> {
        match self {
            GateType::RX | GateType::RY | GateType::RZ | GateType::RZZ => Some(1),
            GateType::U => Some(3),
            GateType::Custom(_) => None,
            _ => Some(0),
        }
    }

    /// Whether two consecutive applications on the same qubits cancel.
    pub fn is_self_inverse(&self) -> bool {
        matches!(
            self,
            GateType::H
                | GateType::X
                | GateType::Y
                | GateType::Z
                | GateType::CX
                | GateType::CZ
                | GateType::SWAP
                | GateType::CCX
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip_for_standard_gates() {
        for gate in [GateType::H, GateType::SX, GateType::RZZ, GateType::Sdg, GateType::SWAP] {
            assert_eq!(GateType::from_name(gate.name()), gate);
        }
    }

    #[test]
    fn test_unknown_gate_is_custom() {
        assert_eq!(
            GateType::from_name("foo"),
            GateType::Custom("foo".to_string())
        );
        assert_eq!(GateType::Custom("foo".to_string()).num_qubits(), None);
    }

    #[test]
    fn test_u1_alias() {
        assert_eq!(GateType::from_name("u1"), GateType::RZ);
    }
}
