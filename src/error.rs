//! Error types for ansatz assembly and the transpiler stages.

use thiserror::Error;

/// Errors raised while building or transforming a circuit.
///
/// Every variant is fatal. The one recoverable condition, a missing layout,
/// is reported as a [`crate::qaoa::Diagnostic`] instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QaoaError {
    /// A layer template must expose exactly one free parameter.
    #[error("layer template must have exactly one free parameter, found {found}")]
    UnboundParameterCount { found: usize },

    /// A qubit mapping is not a bijection over `0..size`.
    #[error("invalid permutation over {size} qubits: {reason}")]
    InvalidPermutation { size: usize, reason: String },

    /// Zero qubits were requested.
    #[error("ansatz register must have at least one qubit")]
    EmptyRegister,

    /// An operation touches a qubit outside the register.
    #[error("qubit index {qubit} out of range for a register of {num_qubits} qubits")]
    QubitOutOfRange { qubit: usize, num_qubits: usize },

    /// A pipeline stage was entered out of order.
    #[error("cannot move pipeline from stage {from} to stage {to}")]
    StageOrder { from: String, to: String },

    /// The basis translator has no rule for a gate.
    #[error("gate '{0}' cannot be translated to the target basis")]
    UnsupportedGate(String),

    /// The qubit path handed to the layout stage is unusable.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// A gate is applied to the wrong number of qubits.
    #[error("gate '{gate}' acts on {expected} qubits, got {actual}")]
    GateArity {
        gate: String,
        expected: usize,
        actual: usize,
    },

    /// A two-qubit gate acts on physical qubits that are not coupled.
    #[error("gate '{gate}' on physical qubits ({a}, {b}) violates the coupling map")]
    CouplingViolation { gate: String, a: usize, b: usize },

    /// A parameter vector was bound with the wrong number of values.
    #[error("expected {expected} values for parameter vector '{name}', got {actual}")]
    ParameterLength {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// A symbol is still free where a number is required.
    #[error("parameter '{0}' has no value")]
    UnboundSymbol(String),

    /// OpenQASM input could not be read.
    #[error("parse error: {0}")]
    Parse(String),

    /// A circuit or ansatz could not be written out as JSON.
    #[error("serialization error: {0}")]
    Serialize(String),

    /// Configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QaoaError>;
