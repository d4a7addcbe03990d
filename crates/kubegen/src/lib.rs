//! kubegen: deterministic Kubernetes API type generation from parsed
//! Protocol Buffer schemas.
//!
//! ## Crate layout
//! - `schema`: descriptor model and the scanner that builds the type graph.
//! - `naming`: qualified name → target identifier resolution.
//! - `build`: classifier and emitter producing generated source files.
//! - `meta`: the identity-metadata types embedded by generated code.
//!
//! The [`Driver`] ties the stages together: hand it the host's parsed
//! [`schema::node::SchemaFile`] set and get back the ordered
//! [`EmittedFile`] sequence, or the first error, fail-fast with no partial
//! output.

pub use kubegen_build as build;
pub use kubegen_naming as naming;
pub use kubegen_schema as schema;

mod config;
mod driver;
pub mod meta;

pub use config::Config;
pub use driver::{Driver, Stage};
pub use kubegen_build::{Cancel, EmittedFile, GeneratedType, Role};

use kubegen_build::{ClassifyError, EmitError};
use kubegen_schema::graph::ScanError;
use thiserror::Error as ThisError;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{Cancel, Config, Driver, EmittedFile, Error, Role};
    pub use kubegen_naming::{DefaultNameSystem, NameSystem, NamingConfig, ResolvedName};
    pub use kubegen_schema::prelude::*;
}

///
/// Error
/// every variant names the pipeline stage it came from; the stage errors
/// carry the offending fully-qualified type name
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("scan: {0}")]
    Scan(#[from] ScanError),

    #[error("classify: {0}")]
    Classify(#[from] ClassifyError),

    #[error("emit: {0}")]
    Emit(EmitError),

    #[error("generation cancelled during {stage}")]
    Cancelled { stage: Stage },
}
