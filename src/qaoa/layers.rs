//! Alternation of forward and reversed cost layers with mixer layers.

use super::template::ParametricLayer;
use crate::error::{QaoaError, Result};
use crate::ir::{Circuit, ParameterVector};
use tracing::debug;

/// The bound layer body of an ansatz, before initial state and measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct AlternatingLayers {
    pub circuit: Circuit,
    pub gammas: ParameterVector,
    pub betas: ParameterVector,
}

/// Names of the per-layer parameter vectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerNames<'a> {
    pub gamma: &'a str,
    pub beta: &'a str,
}

impl Default for LayerNames<'_> {
    fn default() -> Self {
        Self {
            gamma: "γ",
            beta: "β",
        }
    }
}

/// Builds `num_layers` QAOA layers over `num_qubits` qubits.
///
/// Layer `l` binds the cost layer to `γ[l]` and the mixer to `β[l]`. Even
/// layers use the cost layer as given, odd layers its operation-order
/// reversal. The mixer is never reversed.
pub fn build_layers(
    cost_layer: &ParametricLayer,
    mixer: &ParametricLayer,
    num_qubits: usize,
    num_layers: usize,
) -> Result<AlternatingLayers> {
    build_layers_named(cost_layer, mixer, num_qubits, num_layers, &LayerNames::default())
}

pub fn build_layers_named(
    cost_layer: &ParametricLayer,
    mixer: &ParametricLayer,
    num_qubits: usize,
    num_layers: usize,
    names: &LayerNames<'_>,
) -> Result<AlternatingLayers> {
    if num_qubits == 0 {
        return Err(QaoaError::EmptyRegister);
    }
    for template in [cost_layer, mixer] {
        if template.num_qubits() > num_qubits {
            return Err(QaoaError::QubitOutOfRange {
                qubit: template.num_qubits() - 1,
                num_qubits,
            });
        }
    }

    let gammas = ParameterVector::new(names.gamma, num_layers);
    let betas = ParameterVector::new(names.beta, num_layers);
    let wires: Vec<usize> = (0..num_qubits).collect();
    let mut circuit = Circuit::new(num_qubits, 0);

    for layer in 0..num_layers {
        let bound_cost = cost_layer.bind(&gammas[layer]);
        let bound_mixer = mixer.bind(&betas[layer]);

        if layer % 2 == 0 {
            circuit.compose(&bound_cost, &wires)?;
        } else {
            circuit.compose(&bound_cost.reverse_ops(), &wires)?;
        }
        circuit.compose(&bound_mixer, &wires)?;

        debug!(
            layer,
            reversed = layer % 2 == 1,
            ops = circuit.operations.len(),
            "bound qaoa layer"
        );
    }

    Ok(AlternatingLayers {
        circuit,
        gammas,
        betas,
    })
}
