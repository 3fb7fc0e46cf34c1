pub mod circuit;
pub mod gates;
pub mod operations;
pub mod parameter;

// Re-export for easier access
pub use circuit::Circuit;
pub use gates::GateType;
pub use operations::Operation;
pub use parameter::{ParamExpr, Parameter, ParameterVector};
