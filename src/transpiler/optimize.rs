use super::pass::{Pass, PassContext};
use crate::error::Result;
use crate::ir::{Circuit, GateType, Operation};

/// Removes pairs of identical self-inverse gates with nothing between them
/// on their qubits. `swap` and `cz` match in either qubit order.
///
/// Removal can expose further pairs (`h x x h`), which are caught in the
/// same sweep.
#[derive(Debug, Clone, Copy, Default)]
pub struct InverseCancellation;

fn cancellable(op: &Operation) -> bool {
    match op {
        Operation::Gate { name, params, .. } => name.is_self_inverse() && params.is_empty(),
        _ => false,
    }
}

fn symmetric(name: &GateType) -> bool {
    matches!(name, GateType::SWAP | GateType::CZ)
}

fn cancels(prev: &Operation, op: &Operation) -> bool {
    match (prev, op) {
        (
            Operation::Gate {
                name: a,
                qubits: qa,
                params: pa,
            },
            Operation::Gate {
                name: b,
                qubits: qb,
                params: pb,
            },
        ) if a == b && pa == pb => {
            if symmetric(a) {
                let (mut sa, mut sb) = (qa.clone(), qb.clone());
                sa.sort_unstable();
                sb.sort_unstable();
                sa == sb
            } else {
                qa == qb
            }
        }
        _ => false,
    }
}

impl Pass for InverseCancellation {
    fn name(&self) -> &str {
        "InverseCancellation"
    }

    fn run(&self, circuit: &Circuit, _context: &PassContext) -> Result<Circuit> {
        let mut operations: Vec<Operation> = Vec::with_capacity(circuit.operations.len());
        for op in &circuit.operations {
            if cancellable(op) {
                let qubits = op.qubits();
                let last = operations
                    .iter()
                    .rposition(|prev| prev.qubits().iter().any(|q| qubits.contains(q)));
                if let Some(i) = last {
                    if cancels(&operations[i], op) {
                        operations.remove(i);
                        continue;
                    }
                }
            }
            operations.push(op.clone());
        }
        Ok(Circuit {
            operations,
            ..circuit.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(circuit: &Circuit) -> Circuit {
        InverseCancellation.run(circuit, &PassContext::new()).unwrap()
    }

    #[test]
    fn test_adjacent_cx_cancel() {
        let mut circuit = Circuit::new(2, 0);
        circuit.cx(0, 1);
        circuit.cx(0, 1);
        assert!(run(&circuit).operations.is_empty());
    }

    #[test]
    fn test_reversed_cx_does_not_cancel() {
        let mut circuit = Circuit::new(2, 0);
        circuit.cx(0, 1);
        circuit.cx(1, 0);
        assert_eq!(run(&circuit).operations.len(), 2);
    }

    #[test]
    fn test_symmetric_gates_cancel_in_either_order() {
        let mut circuit = Circuit::new(2, 0);
        circuit.swap(0, 1);
        circuit.swap(1, 0);
        circuit.gate(GateType::CZ, &[0, 1], vec![]);
        circuit.gate(GateType::CZ, &[1, 0], vec![]);
        assert!(run(&circuit).operations.is_empty());
    }

    #[test]
    fn test_nested_pairs() {
        let mut circuit = Circuit::new(1, 0);
        circuit.h(0);
        circuit.gate(GateType::X, &[0], vec![]);
        circuit.gate(GateType::X, &[0], vec![]);
        circuit.h(0);
        assert!(run(&circuit).operations.is_empty());
    }

    #[test]
    fn test_gate_on_other_qubit_does_not_block() {
        let mut circuit = Circuit::new(3, 0);
        circuit.cx(0, 1);
        circuit.h(2);
        circuit.cx(0, 1);
        let out = run(&circuit);
        assert_eq!(out.operations.len(), 1);
        assert_eq!(out.operations[0].qubits(), vec![2]);
    }

    #[test]
    fn test_blocked_by_rotation() {
        let mut circuit = Circuit::new(2, 0);
        circuit.cx(0, 1);
        circuit.rz(0.5, 1);
        circuit.cx(0, 1);
        assert_eq!(run(&circuit).operations.len(), 3);
    }
}
