use crate::error::Result;
use crate::ir::Circuit;
use crate::qaoa::Layout;
use tracing::debug;

/// Read-only state shared by the passes of one pipeline run.
///
/// Replaces ambient property sets: whatever a pass may consult is handed in
/// here explicitly.
#[derive(Debug, Clone, Default)]
pub struct PassContext {
    /// Layout computed by the routing step, if any.
    pub layout: Option<Layout>,
}

impl PassContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(layout: Layout) -> Self {
        Self {
            layout: Some(layout),
        }
    }
}

/// A trait for transpiler passes.
///
/// A pass takes a circuit and returns a transformed circuit.
pub trait Pass {
    /// Returns the name of the pass.
    fn name(&self) -> &str;

    /// Runs the pass on the given circuit.
    fn run(&self, circuit: &Circuit, context: &PassContext) -> Result<Circuit>;
}

/// Manages a sequence of transpiler passes.
#[derive(Default)]
pub struct PassManager {
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Creates a new empty PassManager.
    pub fn new() -> Self {
        Self { passes: Vec::new() }
    }

    /// Adds a pass to the manager.
    pub fn add_pass(&mut self, pass: Box<dyn Pass>) {
        self.passes.push(pass);
    }

    /// Builder form of [`PassManager::add_pass`].
    pub fn with_pass(mut self, pass: impl Pass + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Runs all passes in sequence on the given circuit.
    pub fn run(&self, circuit: &Circuit, context: &PassContext) -> Result<Circuit> {
        let mut current_circuit = circuit.clone();
        for pass in &self.passes {
            current_circuit = pass.run(&current_circuit, context)?;
            debug!(
                pass = pass.name(),
                ops = current_circuit.operations.len(),
                "pass finished"
            );
        }
        Ok(current_circuit)
    }
}
