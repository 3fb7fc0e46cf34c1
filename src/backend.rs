use petgraph::graph::{Graph, NodeIndex};
use petgraph::Directed;
use std::collections::HashSet;
use tracing::warn;

/// Target device: qubit count, basis gates and coupling map.
#[derive(Debug, Clone)]
pub struct Backend {
    pub name: String,
    pub num_qubits: usize,
    pub basis_gates: HashSet<String>,
    /// Node `i` is physical qubit `i`; an edge allows a two-qubit gate.
    pub coupling_map: Graph<(), (), Directed>,
}

impl Backend {
    /// A device with `num_qubits` uncoupled qubits and an empty basis.
    pub fn new(name: impl Into<String>, num_qubits: usize) -> Self {
        let mut coupling_map = Graph::with_capacity(num_qubits, 0);
        for _ in 0..num_qubits {
            coupling_map.add_node(());
        }
        Self {
            name: name.into(),
            num_qubits,
            basis_gates: HashSet::new(),
            coupling_map,
        }
    }

    /// A line of qubits `0 - 1 - ... - n-1`, coupled in both directions,
    /// with the `{rz, sx, x, cx}` basis.
    pub fn linear(name: impl Into<String>, num_qubits: usize) -> Self {
        let mut backend = Self::new(name, num_qubits);
        for gate in ["rz", "sx", "x", "cx"] {
            backend.add_basis_gate(gate);
        }
        let edges = (1..num_qubits)
            .flat_map(|q| [(q - 1, q), (q, q - 1)])
            .collect();
        backend.set_coupling_map(edges);
        backend
    }

    pub fn add_basis_gate(&mut self, gate: &str) {
        self.basis_gates.insert(gate.to_string());
    }

    /// Replaces the coupling map with directed `(source, target)` edges.
    pub fn set_coupling_map(&mut self, edges: Vec<(usize, usize)>) {
        self.coupling_map.clear_edges();
        for (u, v) in edges {
            if u < self.num_qubits && v < self.num_qubits {
                self.coupling_map
                    .add_edge(NodeIndex::new(u), NodeIndex::new(v), ());
            } else {
                warn!(backend = %self.name, u, v, "dropping coupling edge outside the device");
            }
        }
    }

    /// Whether a two-qubit gate may act on `a` and `b`, in either direction.
    pub fn are_coupled(&self, a: usize, b: usize) -> bool {
        if a >= self.num_qubits || b >= self.num_qubits {
            return false;
        }
        let (na, nb) = (NodeIndex::new(a), NodeIndex::new(b));
        self.coupling_map.contains_edge(na, nb) || self.coupling_map.contains_edge(nb, na)
    }
}
