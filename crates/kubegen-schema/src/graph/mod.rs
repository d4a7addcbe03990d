//! The scanner: resolves parsed descriptors into a read-only type graph.

mod builder;
mod cycle;

pub use builder::Builder;

use crate::prelude::*;
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// ScanError
///

#[derive(Debug, ThisError)]
pub enum ScanError {
    #[error("unresolved reference '{referent}' in field '{field}' of '{message}'")]
    UnresolvedReference {
        message: String,
        field: String,
        referent: String,
    },

    #[error("duplicate type '{qualified}' declared in '{first}' and '{second}'")]
    DuplicateType {
        qualified: String,
        first: String,
        second: String,
    },

    #[error("invalid identifier in '{file}': {reason}")]
    InvalidIdent { file: String, reason: String },
}

///
/// NodeId
/// index into the graph's node vector, assigned in scan order
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }
}

///
/// ResolvedItem
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ResolvedItem {
    Primitive(Primitive),
    Node(NodeId),
}

///
/// ResolvedField
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ResolvedField {
    pub ident: String,
    pub cardinality: Cardinality,
    pub item: ResolvedItem,

    /// Set on singular/optional message fields that close a reference
    /// cycle; the emitter represents these with owned indirection.
    pub boxed: bool,
}

///
/// TypeNode
/// the resolved view of one message; read-only once the graph is built
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TypeNode {
    pub id: NodeId,
    pub qualified: String,
    pub ident: String,
    pub file: String,
    pub package: String,
    pub annotations: BTreeMap<String, String>,
    pub fields: Vec<ResolvedField>,

    /// Nodes with at least one field referring back to this one,
    /// deduplicated and in scan order.
    pub referenced_by: Vec<NodeId>,

    pub in_cycle: bool,
}

impl TypeNode {
    #[must_use]
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn has_marker(&self, key: &str) -> bool {
        self.annotation(key).is_some_and(|v| v != "false")
    }
}

///
/// TypeGraph
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TypeGraph {
    nodes: Vec<TypeNode>,
    index: BTreeMap<String, NodeId>,
}

impl TypeGraph {
    /// Nodes in deterministic scan order: file order, then declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &TypeNode> {
        self.nodes.iter()
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &TypeNode {
        &self.nodes[id.index()]
    }

    #[must_use]
    pub fn get(&self, qualified: &str) -> Option<&TypeNode> {
        self.index.get(qualified).map(|id| self.node(*id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) const fn from_parts(nodes: Vec<TypeNode>, index: BTreeMap<String, NodeId>) -> Self {
        Self { nodes, index }
    }
}
