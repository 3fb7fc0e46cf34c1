//! Layered QAOA ansatz assembly for routed cost layers.
//!
//! The crate takes a cost layer that an external router has already fitted to
//! a restricted coupling map, alternates forward and reversed copies of it with
//! a mixer layer, and recovers which physical qubit has to be measured into
//! which classical bit.
//!
//! ```
//! use qaoa_swap::qaoa::{assemble, cost_layer_from_edges};
//!
//! let cost = cost_layer_from_edges(3, &[(0, 1, 1.0), (1, 2, 1.0)]).unwrap();
//! let ansatz = assemble(3, 2, &cost).unwrap();
//! assert!(ansatz.measurement_map().is_identity());
//! ```

pub mod backend;
pub mod error;
pub mod ir;
pub mod parser;
pub mod qaoa;
pub mod transpiler;

pub use error::{QaoaError, Result};
