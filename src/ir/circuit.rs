use super::gates::GateType;
use super::operations::Operation;
use super::parameter::{ParamExpr, Parameter};
use crate::error::{QaoaError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Intermediate Representation of a Quantum Circuit.
///
/// A `Circuit` consists of a sequence of operations and metadata about the
/// number of qubits and classical bits required. Every transform returns a
/// new circuit and leaves the receiver untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Total number of qubits in the circuit.
    pub num_qubits: usize,
    /// Total number of classical bits in the circuit.
    pub num_cbits: usize,
    /// Sequence of operations (gates, measurements, etc.).
    pub operations: Vec<Operation>,
    /// Routing metadata: for each output wire, the logical qubit it carries
    /// once the block has run. Set by the router that produced the circuit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routed_order: Option<Vec<usize>>,
}

impl Circuit {
    /// Creates a new empty circuit.
    ///
    /// # Arguments
    ///
    /// * `num_qubits` - The number of qubits to allocate.
    /// * `num_cbits` - The number of classical bits to allocate.
    pub fn new(num_qubits: usize, num_cbits: usize) -> Self {
        Self {
            num_qubits,
            num_cbits,
            operations: Vec::new(),
            routed_order: None,
        }
    }

    /// Adds an operation to the circuit.
    pub fn add_op(&mut self, op: Operation) {
        self.operations.push(op);
    }

    pub fn gate(&mut self, name: GateType, qubits: &[usize], params: Vec<ParamExpr>) {
        self.add_op(Operation::gate(name, qubits.to_vec(), params));
    }

    pub fn h(&mut self, qubit: usize) {
        self.gate(GateType::H, &[qubit], vec![]);
    }

    pub fn rx(&mut self, theta: impl Into<ParamExpr>, qubit: usize) {
        self.gate(GateType::RX, &[qubit], vec![theta.into()]);
    }

    pub fn rz(&mut self, theta: impl Into<ParamExpr>, qubit: usize) {
        self.gate(GateType::RZ, &[qubit], vec![theta.into()]);
    }

    pub fn rzz(&mut self, theta: impl Into<ParamExpr>, a: usize, b: usize) {
        self.gate(GateType::RZZ, &[a, b], vec![theta.into()]);
    }

    pub fn cx(&mut self, control: usize, target: usize) {
        self.gate(GateType::CX, &[control, target], vec![]);
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.gate(GateType::SWAP, &[a, b], vec![]);
    }

    pub fn measure(&mut self, qubit: usize, cbit: usize) {
        self.add_op(Operation::Measure { qubit, cbit });
    }

    /// Free symbols in order of first appearance.
    pub fn parameters(&self) -> Vec<Parameter> {
        let mut out = Vec::new();
        for op in &self.operations {
            if let Operation::Gate { params, .. } = op {
                for param in params {
                    param.collect_parameters(&mut out);
                }
            }
        }
        out
    }

    /// Returns a copy with every mapped symbol substituted.
    pub fn assign_parameters(&self, bindings: &HashMap<Parameter, ParamExpr>) -> Circuit {
        let operations = self
            .operations
            .iter()
            .map(|op| match op {
                Operation::Gate {
                    name,
                    qubits,
                    params,
                } => Operation::Gate {
                    name: name.clone(),
                    qubits: qubits.clone(),
                    params: params.iter().map(|p| p.substitute(bindings)).collect(),
                },
                other => other.clone(),
            })
            .collect();
        Circuit {
            operations,
            ..self.clone()
        }
    }

    /// Replaces every symbol with a number.
    pub fn assign_values(&self, values: &HashMap<Parameter, f64>) -> Result<Circuit> {
        let mut operations = Vec::with_capacity(self.operations.len());
        for op in &self.operations {
            operations.push(match op {
                Operation::Gate {
                    name,
                    qubits,
                    params,
                } => {
                    let mut bound = Vec::with_capacity(params.len());
                    for p in params {
                        bound.push(ParamExpr::Const(p.evaluate(values)?));
                    }
                    Operation::gate(name.clone(), qubits.clone(), bound)
                }
                other => other.clone(),
            });
        }
        Ok(Circuit {
            operations,
            ..self.clone()
        })
    }

    /// Same operations with the execution order reversed.
    ///
    /// Qubit targets and parameters of each operation are kept as they are;
    /// this is not the inverse circuit.
    pub fn reverse_ops(&self) -> Circuit {
        let mut reversed = self.clone();
        reversed.operations.reverse();
        reversed
    }

    /// Appends `other`, sending its qubit `i` to `qubits[i]` of `self`.
    pub fn compose(&mut self, other: &Circuit, qubits: &[usize]) -> Result<()> {
        if qubits.len() < other.num_qubits {
            return Err(QaoaError::QubitOutOfRange {
                qubit: qubits.len(),
                num_qubits: other.num_qubits,
            });
        }
        for &q in qubits {
            if q >= self.num_qubits {
                return Err(QaoaError::QubitOutOfRange {
                    qubit: q,
                    num_qubits: self.num_qubits,
                });
            }
        }
        other.validate()?;
        for op in &other.operations {
            self.add_op(op.map_qubits(|q| qubits[q]));
        }
        Ok(())
    }

    /// Checks gate arities and that every qubit and classical bit index is
    /// in range.
    pub fn validate(&self) -> Result<()> {
        for op in &self.operations {
            if let Operation::Gate { name, qubits, .. } = op {
                if let Some(expected) = name.num_qubits() {
                    if qubits.len() != expected {
                        return Err(QaoaError::GateArity {
                            gate: name.name().to_string(),
                            expected,
                            actual: qubits.len(),
                        });
                    }
                }
            }
            for q in op.qubits() {
                if q >= self.num_qubits {
                    return Err(QaoaError::QubitOutOfRange {
                        qubit: q,
                        num_qubits: self.num_qubits,
                    });
                }
            }
            if let Operation::Measure { cbit, .. } = op {
                if *cbit >= self.num_cbits {
                    return Err(QaoaError::QubitOutOfRange {
                        qubit: *cbit,
                        num_qubits: self.num_cbits,
                    });
                }
            }
        }
        Ok(())
    }

    /// Number of operations per name, sorted by name.
    pub fn count_ops(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for op in &self.operations {
            *counts.entry(op.name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| QaoaError::Serialize(e.to_string()))
    }
}
