use super::pass::{Pass, PassContext};
use crate::backend::Backend;
use crate::error::{QaoaError, Result};
use crate::ir::{Circuit, Operation};
use std::collections::HashSet;

/// Places virtual qubit `i` on physical qubit `path[i]` of the backend.
///
/// The register grows to the backend size; the extra qubits are idle
/// ancillas. Every multi-qubit gate must land on coupled qubits.
#[derive(Debug, Clone)]
pub struct ApplyLayout {
    backend: Backend,
    path: Vec<usize>,
}

impl ApplyLayout {
    pub fn new(backend: Backend, path: Vec<usize>) -> Self {
        Self { backend, path }
    }

    fn check_path(&self, num_qubits: usize) -> Result<()> {
        if self.path.len() != num_qubits {
            return Err(QaoaError::InvalidLayout(format!(
                "path has {} qubits, circuit has {}",
                self.path.len(),
                num_qubits
            )));
        }
        let mut seen = HashSet::new();
        for &phys in &self.path {
            if phys >= self.backend.num_qubits {
                return Err(QaoaError::InvalidLayout(format!(
                    "physical qubit {} not on backend '{}' ({} qubits)",
                    phys, self.backend.name, self.backend.num_qubits
                )));
            }
            if !seen.insert(phys) {
                return Err(QaoaError::InvalidLayout(format!(
                    "physical qubit {} used twice",
                    phys
                )));
            }
        }
        Ok(())
    }
}

impl Pass for ApplyLayout {
    fn name(&self) -> &str {
        "ApplyLayout"
    }

    fn run(&self, circuit: &Circuit, _context: &PassContext) -> Result<Circuit> {
        self.check_path(circuit.num_qubits)?;
        circuit.validate()?;

        let mut laid_out = Circuit::new(self.backend.num_qubits, circuit.num_cbits);
        for op in &circuit.operations {
            let mapped = op.map_qubits(|q| self.path[q]);
            if let Operation::Gate { name, qubits, .. } = &mapped {
                for (i, &a) in qubits.iter().enumerate() {
                    for &b in &qubits[i + 1..] {
                        if !self.backend.are_coupled(a, b) {
                            return Err(QaoaError::CouplingViolation {
                                gate: name.name().to_string(),
                                a,
                                b,
                            });
                        }
                    }
                }
            }
            laid_out.add_op(mapped);
        }
        Ok(laid_out)
    }
}
