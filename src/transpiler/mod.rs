pub mod basis;
pub mod layout;
pub mod optimize;
pub mod pass;
pub mod qaoa_pass;
pub mod staged;

pub use basis::BasisTranslator;
pub use layout::ApplyLayout;
pub use optimize::InverseCancellation;
pub use pass::{Pass, PassContext, PassManager};
pub use qaoa_pass::QaoaPass;
pub use staged::{Stage, StagedOutput, StagedPassManager};
