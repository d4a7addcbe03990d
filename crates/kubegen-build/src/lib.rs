//! Classifier and emitter for kube-type generation.
//!
//! Consumes the scanned [`kubegen_schema::graph::TypeGraph`] plus a
//! [`kubegen_naming::NameSystem`] and produces deterministic generated
//! source, one [`EmittedFile`] per target path.

mod cancel;
mod classify;
mod emit;

pub use cancel::Cancel;
pub use classify::{ClassifyError, GeneratedType, Markers, Role, classify};
pub use emit::{EmitError, EmittedFile, emit};
