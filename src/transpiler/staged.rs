//! The staged pipeline: an explicit, strictly ordered state machine.

use super::pass::{PassContext, PassManager};
use crate::error::{QaoaError, Result};
use crate::ir::Circuit;
use std::fmt;
use tracing::info;

/// Lifecycle of a circuit going through the staged pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Uninitialized,
    Layered,
    BasisTranslated,
    LaidOut,
    Optimized,
}

impl Stage {
    /// The only stage reachable from `self`.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Uninitialized => Some(Stage::Layered),
            Stage::Layered => Some(Stage::BasisTranslated),
            Stage::BasisTranslated => Some(Stage::LaidOut),
            Stage::LaidOut => Some(Stage::Optimized),
            Stage::Optimized => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Uninitialized => "uninitialized",
            Stage::Layered => "layered",
            Stage::BasisTranslated => "basis_translated",
            Stage::LaidOut => "laid_out",
            Stage::Optimized => "optimized",
        }
    }

    fn advance(self, to: Stage) -> Result<Stage> {
        if self.next() == Some(to) {
            Ok(to)
        } else {
            Err(QaoaError::StageOrder {
                from: self.name().to_string(),
                to: to.name().to_string(),
            })
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Output of a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedOutput {
    pub circuit: Circuit,
    /// Last stage the circuit reached.
    pub stage: Stage,
}

/// An ordered list of stages, each backed by a [`PassManager`].
///
/// Stages must be registered in lifecycle order starting at
/// [`Stage::Layered`]; none may be skipped or repeated.
#[derive(Default)]
pub struct StagedPassManager {
    stages: Vec<(Stage, PassManager)>,
}

impl StagedPassManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the pass manager that moves circuits into `stage`.
    pub fn stage(mut self, stage: Stage, passes: PassManager) -> Result<Self> {
        self.last_stage().advance(stage)?;
        self.stages.push((stage, passes));
        Ok(self)
    }

    /// Stage a circuit ends in after a full run.
    pub fn last_stage(&self) -> Stage {
        self.stages
            .last()
            .map(|(stage, _)| *stage)
            .unwrap_or(Stage::Uninitialized)
    }

    pub fn stages(&self) -> Vec<Stage> {
        self.stages.iter().map(|(stage, _)| *stage).collect()
    }

    /// Runs every stage in order; each consumes the full output of the last.
    pub fn run(&self, circuit: &Circuit, context: &PassContext) -> Result<StagedOutput> {
        let mut state = Stage::Uninitialized;
        let mut current = circuit.clone();
        for (stage, passes) in &self.stages {
            state = state.advance(*stage)?;
            current = passes.run(&current, context)?;
            info!(
                stage = %state,
                ops = current.operations.len(),
                "pipeline stage complete"
            );
        }
        Ok(StagedOutput {
            circuit: current,
            stage: state,
        })
    }
}
