//! Single-parameter layer templates and the default layers.

use crate::error::{QaoaError, Result};
use crate::ir::{Circuit, ParamExpr, Parameter};
use std::collections::HashMap;

/// A reusable operation sequence with exactly one free parameter.
///
/// The same template is bound once per QAOA layer; binding never touches the
/// stored circuit.
#[derive(Debug, Clone, PartialEq)]
pub struct ParametricLayer {
    circuit: Circuit,
    parameter: Parameter,
}

impl ParametricLayer {
    /// Wraps `circuit`, failing unless it is well formed and has exactly
    /// one free parameter.
    pub fn new(circuit: Circuit) -> Result<Self> {
        circuit.validate()?;
        let mut params = circuit.parameters();
        if params.len() != 1 {
            return Err(QaoaError::UnboundParameterCount {
                found: params.len(),
            });
        }
        let parameter = params.remove(0);
        Ok(Self { circuit, parameter })
    }

    pub fn parameter(&self) -> &Parameter {
        &self.parameter
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn num_qubits(&self) -> usize {
        self.circuit.num_qubits
    }

    pub fn len(&self) -> usize {
        self.circuit.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circuit.operations.is_empty()
    }

    /// Returns the template with its parameter replaced by `value`.
    pub fn bind(&self, value: impl Into<ParamExpr>) -> Circuit {
        let mut bindings = HashMap::with_capacity(1);
        bindings.insert(self.parameter.clone(), value.into());
        self.circuit.assign_parameters(&bindings)
    }
}

/// Uniform superposition: one `h` per qubit.
pub fn default_initial_state(num_qubits: usize) -> Circuit {
    let mut circuit = Circuit::new(num_qubits, 0);
    for q in 0..num_qubits {
        circuit.h(q);
    }
    circuit
}

/// `rx(-2*p)` on every qubit, all sharing the symbol `p`.
pub fn default_mixer(num_qubits: usize) -> Result<ParametricLayer> {
    let p = Parameter::new("p");
    let mut circuit = Circuit::new(num_qubits, 0);
    for q in 0..num_qubits {
        circuit.rx(ParamExpr::from(-2.0) * ParamExpr::from(&p), q);
    }
    ParametricLayer::new(circuit)
}

/// Unrouted cost layer for a weighted graph: `rzz(2*w*γ)` per edge.
///
/// Useful when no router is in the loop; a routed layer built elsewhere can
/// be used in its place.
pub fn cost_layer_from_edges(num_qubits: usize, edges: &[(usize, usize, f64)]) -> Result<Circuit> {
    if num_qubits == 0 {
        return Err(QaoaError::EmptyRegister);
    }
    let gamma = Parameter::new("γ");
    let mut circuit = Circuit::new(num_qubits, 0);
    for &(a, b, weight) in edges {
        for q in [a, b] {
            if q >= num_qubits {
                return Err(QaoaError::QubitOutOfRange { qubit: q, num_qubits });
            }
        }
        circuit.rzz(
            ParamExpr::from(2.0 * weight) * ParamExpr::from(&gamma),
            a,
            b,
        );
    }
    Ok(circuit)
}
