use super::gates::GateType;
use super::parameter::ParamExpr;
use serde::{Deserialize, Serialize};

/// Represents a single operation in the quantum circuit.
///
/// Operations can be quantum gates, measurements, resets, or barriers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// A quantum gate application.
    Gate {
        /// Type of the gate (e.g., H, CX).
        name: GateType,
        /// Indices of the qubits involved.
        qubits: Vec<usize>,
        /// Angles of the gate, possibly symbolic.
        params: Vec<ParamExpr>,
    },
    /// A measurement operation.
    Measure {
        /// Index of the qubit to measure.
        qubit: usize,
        /// Index of the classical bit to store the result.
        cbit: usize,
    },
    /// Reset a qubit to the |0> state.
    Reset {
        /// Index of the qubit to reset.
        qubit: usize,
    },
    /// A barrier to prevent optimizations across a boundary.
    Barrier {
        /// Indices of the qubits involved in the barrier.
        qubits: Vec<usize>,
    },
}

impl Operation {
    pub fn gate(name: GateType, qubits: Vec<usize>, params: Vec<ParamExpr>) -> Self {
        Operation::Gate {
            name,
            qubits,
            params,
        }
    }

    /// Qubits the operation acts on.
    pub fn qubits(&self) -> Vec<usize> {
        match self {
            Operation::Gate { qubits, .. } | Operation::Barrier { qubits } => qubits.clone(),
            Operation::Measure { qubit, .. } | Operation::Reset { qubit } => vec![*qubit],
        }
    }

    /// Returns a copy with every qubit index passed through `map`.
    pub fn map_qubits(&self, map: impl Fn(usize) -> usize) -> Operation {
        match self {
            Operation::Gate {
                name,
                qubits,
                params,
            } => Operation::Gate {
                name: name.clone(),
                qubits: qubits.iter().map(|&q| map(q)).collect(),
                params: params.clone(),
            },
            Operation::Measure { qubit, cbit } => Operation::Measure {
                qubit: map(*qubit),
                cbit: *cbit,
            },
            Operation::Reset { qubit } => Operation::Reset { qubit: map(*qubit) },
            Operation::Barrier { qubits } => Operation::Barrier {
                qubits: qubits.iter().map(|&q| map(q)).collect(),
            },
        }
    }

    /// Short name used for operation counts and diagnostics.
    pub fn name(&self) -> &str {
        match self {
            Operation::Gate { name, .. } => name.name(),
            Operation::Measure { .. } => "measure",
            Operation::Reset { .. } => "reset",
            Operation::Barrier { .. } => "barrier",
        }
    }
}
