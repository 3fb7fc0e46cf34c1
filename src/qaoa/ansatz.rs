//! Assembly of the complete ansatz: initial state, layers, measurements.

use super::config::{PermutationMode, QaoaConfig};
use super::layers::{build_layers_named, LayerNames};
use super::permutation::{derive_permutation, Diagnostic, Layout, Permutation, PermutationSource};
use super::template::{default_initial_state, default_mixer, ParametricLayer};
use crate::error::{QaoaError, Result};
use crate::ir::{Circuit, ParameterVector};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

/// Classical bit that each physical qubit is measured into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementMap {
    cbits: Vec<usize>,
}

impl MeasurementMap {
    pub fn identity(num_qubits: usize) -> Self {
        Self {
            cbits: (0..num_qubits).collect(),
        }
    }

    /// Measures wire `q` into the logical qubit it carries.
    pub fn from_permutation(permutation: &Permutation) -> Self {
        Self {
            cbits: permutation.as_wire_order().to_vec(),
        }
    }

    pub fn cbit(&self, qubit: usize) -> usize {
        self.cbits[qubit]
    }

    pub fn len(&self) -> usize {
        self.cbits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cbits.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.cbits.iter().enumerate().all(|(q, &c)| q == c)
    }

    /// `(physical_qubit, classical_bit)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cbits.iter().copied().enumerate()
    }
}

/// A finished QAOA circuit and the bookkeeping needed to read it out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ansatz {
    circuit: Circuit,
    measurement_map: MeasurementMap,
    gammas: ParameterVector,
    betas: ParameterVector,
    diagnostics: Vec<Diagnostic>,
}

impl Ansatz {
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn measurement_map(&self) -> &MeasurementMap {
        &self.measurement_map
    }

    pub fn gammas(&self) -> &ParameterVector {
        &self.gammas
    }

    pub fn betas(&self) -> &ParameterVector {
        &self.betas
    }

    /// Non-fatal conditions raised during assembly.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_circuit(self) -> Circuit {
        self.circuit
    }

    /// Numeric circuit for the given angles.
    pub fn bind_values(&self, gammas: &[f64], betas: &[f64]) -> Result<Circuit> {
        let mut values: HashMap<_, _> = self.gammas.zip_values(gammas)?;
        values.extend(self.betas.zip_values(betas)?);
        self.circuit.assign_values(&values)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| QaoaError::Serialize(e.to_string()))
    }
}

/// Builds ansatz circuits from routed cost layers.
#[derive(Debug, Clone)]
pub struct AnsatzBuilder {
    config: QaoaConfig,
    initial_state: Option<Circuit>,
    mixer: Option<ParametricLayer>,
}

impl AnsatzBuilder {
    pub fn new(config: QaoaConfig) -> Self {
        Self {
            config,
            initial_state: None,
            mixer: None,
        }
    }

    /// Replaces the uniform superposition.
    pub fn with_initial_state(mut self, initial_state: Circuit) -> Self {
        self.initial_state = Some(initial_state);
        self
    }

    /// Replaces the `rx` mixer.
    pub fn with_mixer(mut self, mixer: ParametricLayer) -> Self {
        self.mixer = Some(mixer);
        self
    }

    pub fn config(&self) -> &QaoaConfig {
        &self.config
    }

    /// Assembles the ansatz around `cost_layer`.
    ///
    /// `layout` is only consulted in [`PermutationMode::Layout`], and only
    /// when the layer count is odd.
    pub fn build(&self, cost_layer: &Circuit, layout: Option<&Layout>) -> Result<Ansatz> {
        self.config.validate()?;
        let num_qubits = self.config.num_qubits;
        let num_layers = self.config.num_layers;

        let cost = ParametricLayer::new(cost_layer.clone())?;
        let mixer = match &self.mixer {
            Some(mixer) => mixer.clone(),
            None => default_mixer(num_qubits)?,
        };
        let initial_state = match &self.initial_state {
            Some(state) => state.clone(),
            None => default_initial_state(num_qubits),
        };
        let found = initial_state.parameters().len();
        if found != 0 {
            return Err(QaoaError::UnboundParameterCount { found });
        }

        let (measurement_map, diagnostics) = if num_layers % 2 == 1 {
            let source = match self.config.permutation_mode {
                PermutationMode::Routing => PermutationSource::Routing,
                PermutationMode::Layout => PermutationSource::Layout(layout),
            };
            let (permutation, diagnostics) = derive_permutation(cost_layer, num_qubits, source)?;
            (MeasurementMap::from_permutation(&permutation), diagnostics)
        } else {
            (MeasurementMap::identity(num_qubits), Vec::new())
        };

        let names = LayerNames {
            gamma: &self.config.gamma_name,
            beta: &self.config.beta_name,
        };
        let layers = build_layers_named(&cost, &mixer, num_qubits, num_layers, &names)?;

        let wires: Vec<usize> = (0..num_qubits).collect();
        let mut circuit = Circuit::new(num_qubits, num_qubits);
        circuit.compose(&initial_state, &wires)?;
        circuit.compose(&layers.circuit, &wires)?;
        for (qubit, cbit) in measurement_map.iter() {
            circuit.measure(qubit, cbit);
        }

        info!(
            num_qubits,
            num_layers,
            ops = circuit.operations.len(),
            trivial_measurement = measurement_map.is_identity(),
            "assembled qaoa ansatz"
        );

        Ok(Ansatz {
            circuit,
            measurement_map,
            gammas: layers.gammas,
            betas: layers.betas,
            diagnostics,
        })
    }
}

/// Standalone assembly with the default initial state and mixer.
///
/// The measurement permutation comes from the cost layer's routing metadata.
pub fn assemble(num_qubits: usize, num_layers: usize, permuted_cost_layer: &Circuit) -> Result<Ansatz> {
    AnsatzBuilder::new(QaoaConfig::new(num_qubits, num_layers)).build(permuted_cost_layer, None)
}
