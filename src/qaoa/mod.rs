//! QAOA ansatz assembly over routed cost layers.
//!
//! The pieces, leaves first: [`ParametricLayer`] binds a one-parameter
//! template, [`derive_permutation`] finds the wire permutation a routed cost
//! layer leaves behind, [`build_layers`] alternates forward and reversed cost
//! layers with mixers, and [`AnsatzBuilder`] wraps the layers with the initial
//! state and the measurements.

pub mod ansatz;
pub mod config;
pub mod layers;
pub mod permutation;
pub mod template;

pub use ansatz::{assemble, Ansatz, AnsatzBuilder, MeasurementMap};
pub use config::{PermutationMode, QaoaConfig};
pub use layers::{build_layers, build_layers_named, AlternatingLayers, LayerNames};
pub use permutation::{derive_permutation, Diagnostic, Layout, Permutation, PermutationSource};
pub use template::{cost_layer_from_edges, default_initial_state, default_mixer, ParametricLayer};
