use derive_more::Display;
use kubegen_naming::{NameSystem, ResolvedName};
use kubegen_schema::{
    graph::{NodeId, ResolvedItem, TypeGraph, TypeNode},
    types::Cardinality,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Markers
/// annotation keys and the identity predicate consulted during classification
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Markers {
    pub kube_object: String,
    pub kube_list: String,
    pub kind: String,

    /// Field names a kube object must declare. Empty means "at least one
    /// declared field".
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identity_fields: Vec<String>,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            kube_object: "kube:object".to_string(),
            kube_list: "kube:list".to_string(),
            kind: "kube:kind".to_string(),
            identity_fields: Vec::new(),
        }
    }
}

///
/// Role
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum Role {
    KubeObject,
    KubeList,
    PlainStruct,
}

///
/// GeneratedType
///

#[derive(Clone, Debug)]
pub struct GeneratedType {
    pub node: NodeId,
    pub qualified: String,
    pub role: Role,

    /// Kind exposed by the generated accessor: the annotation override if
    /// present, the message identifier otherwise.
    pub kind: String,

    pub name: ResolvedName,
}

///
/// ClassifyError
///

#[derive(Debug, ThisError)]
pub enum ClassifyError {
    #[error("invalid annotation on '{qualified}': {reason}")]
    InvalidAnnotation { qualified: String, reason: String },

    #[error("no resolved name for '{qualified}'")]
    MissingName { qualified: String },
}

/// Assign a role to every scanned node, in scan order.
///
/// Pure: the result depends only on the graph, the naming system, and the
/// marker configuration.
pub fn classify(
    graph: &TypeGraph,
    names: &dyn NameSystem,
    markers: &Markers,
) -> Result<Vec<GeneratedType>, ClassifyError> {
    let mut roles = vec![Role::PlainStruct; graph.len()];

    // Objects first; lists validate against them afterwards.
    for node in graph.nodes() {
        if !node.has_marker(&markers.kube_object) {
            continue;
        }
        check_identity(node, markers)?;
        roles[node.id.index()] = Role::KubeObject;
    }

    for node in graph.nodes() {
        if !node.has_marker(&markers.kube_list) {
            continue;
        }
        if roles[node.id.index()] == Role::KubeObject {
            return Err(invalid(node, "marked as both kube object and kube list"));
        }

        let element = list_element(graph, node)?;
        if roles[element.index()] != Role::KubeObject {
            return Err(invalid(
                node,
                &format!(
                    "list element '{}' is not a kube object",
                    graph.node(element).qualified
                ),
            ));
        }
        roles[node.id.index()] = Role::KubeList;
    }

    graph
        .nodes()
        .map(|node| {
            let name = names
                .resolve(&node.qualified)
                .cloned()
                .ok_or_else(|| ClassifyError::MissingName {
                    qualified: node.qualified.clone(),
                })?;

            Ok(GeneratedType {
                node: node.id,
                qualified: node.qualified.clone(),
                role: roles[node.id.index()],
                kind: node
                    .annotation(&markers.kind)
                    .unwrap_or(&node.ident)
                    .to_string(),
                name,
            })
        })
        .collect()
}

fn check_identity(node: &TypeNode, markers: &Markers) -> Result<(), ClassifyError> {
    if markers.identity_fields.is_empty() {
        if node.fields.is_empty() {
            return Err(invalid(node, "kube object declares no payload fields"));
        }
        return Ok(());
    }

    for required in &markers.identity_fields {
        if !node.fields.iter().any(|f| &f.ident == required) {
            return Err(invalid(
                node,
                &format!("kube object is missing identity field '{required}'"),
            ));
        }
    }

    Ok(())
}

/// The single repeated message field a kube list wraps.
fn list_element(graph: &TypeGraph, node: &TypeNode) -> Result<NodeId, ClassifyError> {
    let mut elements = node.fields.iter().filter_map(|field| match field.item {
        ResolvedItem::Node(target) if field.cardinality == Cardinality::Many => Some(target),
        _ => None,
    });

    let Some(element) = elements.next() else {
        return Err(invalid(node, "kube list has no repeated message field"));
    };
    if let Some(extra) = elements.next() {
        return Err(invalid(
            node,
            &format!(
                "kube list has more than one repeated message field (also '{}')",
                graph.node(extra).qualified
            ),
        ));
    }

    Ok(element)
}

fn invalid(node: &TypeNode, reason: &str) -> ClassifyError {
    ClassifyError::InvalidAnnotation {
        qualified: node.qualified.clone(),
        reason: reason.to_string(),
    }
}
