//! Descriptor model and type graph for kube-type generation.
//!
//! - `node`: the parsed descriptor model handed in by the host
//!   (`SchemaFile` / `SchemaMessage` / `SchemaField`).
//! - `types`: field cardinality and the proto3 scalar set.
//! - `graph`: the scanner that resolves descriptors into a read-only
//!   [`graph::TypeGraph`] with cross-file references and cycle marks.

pub mod graph;
pub mod node;
pub mod types;

/// Maximum length for message identifiers.
pub const MAX_MESSAGE_NAME_LEN: usize = 64;

/// Maximum length for field identifiers.
pub const MAX_FIELD_NAME_LEN: usize = 64;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        graph::{Builder, NodeId, ResolvedField, ResolvedItem, ScanError, TypeGraph, TypeNode},
        node::{FieldItem, FieldValue, SchemaField, SchemaFile, SchemaMessage},
        types::{Cardinality, Primitive},
    };
    pub use serde::{Deserialize, Serialize};
}
