//! Tracking of the qubit permutation a routed cost layer leaves behind.

use crate::error::{QaoaError, Result};
use crate::ir::{Circuit, GateType, Operation};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// A bijection between output wires and logical qubits.
///
/// Both directions are stored so lookups are O(1) either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permutation {
    wire_to_logical: Vec<usize>,
    logical_to_wire: Vec<usize>,
}

impl Permutation {
    pub fn identity(size: usize) -> Self {
        Self {
            wire_to_logical: (0..size).collect(),
            logical_to_wire: (0..size).collect(),
        }
    }

    /// Builds a permutation from `order[wire] = logical`.
    pub fn from_wire_order(order: Vec<usize>) -> Result<Self> {
        let size = order.len();
        let mut logical_to_wire = vec![usize::MAX; size];
        for (wire, &logical) in order.iter().enumerate() {
            if logical >= size {
                return Err(QaoaError::InvalidPermutation {
                    size,
                    reason: format!("wire {} maps to logical qubit {}", wire, logical),
                });
            }
            if logical_to_wire[logical] != usize::MAX {
                return Err(QaoaError::InvalidPermutation {
                    size,
                    reason: format!(
                        "logical qubit {} is carried by wires {} and {}",
                        logical, logical_to_wire[logical], wire
                    ),
                });
            }
            logical_to_wire[logical] = wire;
        }
        Ok(Self {
            wire_to_logical: order,
            logical_to_wire,
        })
    }

    /// Accumulates the permutation induced by the `swap` gates of `circuit`.
    pub fn from_swaps(circuit: &Circuit, size: usize) -> Result<Self> {
        let mut mapping: Vec<usize> = (0..size).collect();
        for op in &circuit.operations {
            if let Operation::Gate {
                name: GateType::SWAP,
                qubits,
                ..
            } = op
            {
                let &[a, b] = qubits.as_slice() else {
                    return Err(QaoaError::GateArity {
                        gate: GateType::SWAP.name().to_string(),
                        expected: 2,
                        actual: qubits.len(),
                    });
                };
                if a >= size || b >= size {
                    return Err(QaoaError::QubitOutOfRange {
                        qubit: a.max(b),
                        num_qubits: size,
                    });
                }
                mapping.swap(a, b);
            }
        }
        Self::from_wire_order(mapping)
    }

    pub fn len(&self) -> usize {
        self.wire_to_logical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wire_to_logical.is_empty()
    }

    /// Logical qubit carried by `wire`.
    pub fn logical(&self, wire: usize) -> usize {
        self.wire_to_logical[wire]
    }

    /// Wire carrying `logical`.
    pub fn wire(&self, logical: usize) -> usize {
        self.logical_to_wire[logical]
    }

    pub fn is_identity(&self) -> bool {
        self.wire_to_logical.iter().enumerate().all(|(i, &l)| i == l)
    }

    pub fn as_wire_order(&self) -> &[usize] {
        &self.wire_to_logical
    }
}

/// Placement of classical indices on physical qubits, as computed by an
/// earlier pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    virt_to_phys: Vec<usize>,
}

impl Layout {
    /// `virt_to_phys[c]` is the physical qubit holding classical index `c`.
    pub fn new(virt_to_phys: Vec<usize>) -> Self {
        Self { virt_to_phys }
    }

    pub fn trivial(size: usize) -> Self {
        Self::new((0..size).collect())
    }

    /// `(classical_index, physical_index)` pairs.
    pub fn physical_bits(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.virt_to_phys.iter().copied().enumerate()
    }

    pub fn len(&self) -> usize {
        self.virt_to_phys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.virt_to_phys.is_empty()
    }
}

/// Where the permutation for the measurement map comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PermutationSource<'a> {
    /// Routing metadata on the cost layer, or its `swap` gates when the
    /// router left none.
    Routing,
    /// A layout from pipeline state; `None` falls back to the identity.
    Layout(Option<&'a Layout>),
}

/// Non-fatal conditions met while assembling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// Layout-aware mode found no layout and used the trivial one.
    LayoutMissing,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::LayoutMissing => f.write_str("layout not found, using trivial layout"),
        }
    }
}

/// Permutation left on the wires by `cost_layer`, over `num_qubits` wires.
pub fn derive_permutation(
    cost_layer: &Circuit,
    num_qubits: usize,
    source: PermutationSource<'_>,
) -> Result<(Permutation, Vec<Diagnostic>)> {
    match source {
        PermutationSource::Routing => {
            let permutation = match &cost_layer.routed_order {
                Some(order) => {
                    if order.len() > num_qubits {
                        return Err(QaoaError::InvalidPermutation {
                            size: num_qubits,
                            reason: format!("routing metadata covers {} wires", order.len()),
                        });
                    }
                    let mut full = order.clone();
                    full.extend(order.len()..num_qubits);
                    Permutation::from_wire_order(full)?
                }
                None => {
                    debug!("no routing metadata, tracking swap gates");
                    Permutation::from_swaps(cost_layer, num_qubits)?
                }
            };
            Ok((permutation, Vec::new()))
        }
        PermutationSource::Layout(Some(layout)) => {
            if layout.len() != num_qubits {
                return Err(QaoaError::InvalidPermutation {
                    size: num_qubits,
                    reason: format!("layout places {} qubits", layout.len()),
                });
            }
            let mut order = vec![usize::MAX; num_qubits];
            for (cidx, qidx) in layout.physical_bits() {
                if qidx >= num_qubits {
                    return Err(QaoaError::InvalidPermutation {
                        size: num_qubits,
                        reason: format!("classical bit {} placed on qubit {}", cidx, qidx),
                    });
                }
                order[qidx] = cidx;
            }
            if let Some(wire) = order.iter().position(|&c| c == usize::MAX) {
                return Err(QaoaError::InvalidPermutation {
                    size: num_qubits,
                    reason: format!("physical qubit {} receives no classical bit", wire),
                });
            }
            Ok((Permutation::from_wire_order(order)?, Vec::new()))
        }
        PermutationSource::Layout(None) => {
            let diagnostic = Diagnostic::LayoutMissing;
            warn!(num_qubits, "{}", diagnostic);
            Ok((Permutation::identity(num_qubits), vec![diagnostic]))
        }
    }
}
