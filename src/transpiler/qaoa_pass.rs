use super::pass::{Pass, PassContext};
use crate::error::Result;
use crate::ir::Circuit;
use crate::qaoa::{Ansatz, AnsatzBuilder, ParametricLayer, PermutationMode, QaoaConfig};

/// Pipeline-stage form of the ansatz assembler.
///
/// Receives the routed cost block, re-parameterizes it per layer and reads
/// the measurement layout from the [`PassContext`]. A missing layout falls
/// back to the trivial one with a warning.
#[derive(Debug, Clone)]
pub struct QaoaPass {
    builder: AnsatzBuilder,
}

impl QaoaPass {
    pub fn new(num_layers: usize, num_qubits: usize) -> Self {
        let config = QaoaConfig::new(num_qubits, num_layers)
            .with_permutation_mode(PermutationMode::Layout);
        Self::from_config(config)
    }

    /// Uses `config` as given, including its permutation mode.
    pub fn from_config(config: QaoaConfig) -> Self {
        Self {
            builder: AnsatzBuilder::new(config),
        }
    }

    pub fn with_initial_state(mut self, initial_state: Circuit) -> Self {
        self.builder = self.builder.with_initial_state(initial_state);
        self
    }

    pub fn with_mixer(mut self, mixer: ParametricLayer) -> Self {
        self.builder = self.builder.with_mixer(mixer);
        self
    }

    /// Full assembly result, diagnostics included.
    pub fn build_ansatz(&self, cost_block: &Circuit, context: &PassContext) -> Result<Ansatz> {
        self.builder.build(cost_block, context.layout.as_ref())
    }
}

impl Pass for QaoaPass {
    fn name(&self) -> &str {
        "QaoaPass"
    }

    fn run(&self, circuit: &Circuit, context: &PassContext) -> Result<Circuit> {
        self.build_ansatz(circuit, context).map(Ansatz::into_circuit)
    }
}
