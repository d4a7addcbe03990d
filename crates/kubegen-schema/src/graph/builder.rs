use crate::{
    graph::{NodeId, ResolvedField, ResolvedItem, ScanError, TypeGraph, TypeNode, cycle},
    prelude::*,
};
use std::collections::BTreeMap;

///
/// Builder
///
/// Two-pass scan over the supplied compilation units: register every
/// message under its fully-qualified name, then resolve field references.
/// Node order is file order then declaration order, never map iteration.
///

pub struct Builder;

impl Builder {
    pub fn build(files: &[SchemaFile]) -> Result<TypeGraph, ScanError> {
        let mut nodes: Vec<TypeNode> = Vec::new();
        let mut index: BTreeMap<String, NodeId> = BTreeMap::new();

        // Pass 1: register.
        for file in files {
            for message in &file.messages {
                validate_idents(file, message)?;

                let qualified = qualify(&file.package, &message.ident);
                let id = NodeId::new(nodes.len());

                if let Some(prev) = index.insert(qualified.clone(), id) {
                    return Err(ScanError::DuplicateType {
                        qualified,
                        first: nodes[prev.index()].file.clone(),
                        second: file.name.clone(),
                    });
                }

                nodes.push(TypeNode {
                    id,
                    qualified,
                    ident: message.ident.clone(),
                    file: file.name.clone(),
                    package: file.package.clone(),
                    annotations: message.annotations.clone(),
                    fields: Vec::new(),
                    referenced_by: Vec::new(),
                    in_cycle: false,
                });
            }
        }

        // Pass 2: resolve field references.
        let mut next = 0;
        for file in files {
            for message in &file.messages {
                let fields = message
                    .fields
                    .iter()
                    .map(|field| resolve_field(file, message, field, &index))
                    .collect::<Result<Vec<_>, _>>()?;

                nodes[next].fields = fields;
                next += 1;
            }
        }

        // Back-references, deduplicated in scan order.
        let mut edges: Vec<(NodeId, NodeId)> = Vec::new();
        for node in &nodes {
            for field in &node.fields {
                if let ResolvedItem::Node(target) = field.item {
                    edges.push((node.id, target));
                }
            }
        }
        for (source, target) in edges {
            let backs = &mut nodes[target.index()].referenced_by;
            if !backs.contains(&source) {
                backs.push(source);
            }
        }

        cycle::mark(&mut nodes);

        Ok(TypeGraph::from_parts(nodes, index))
    }
}

/// Ensure message and field identifiers are non-empty ASCII within bounds.
fn validate_idents(file: &SchemaFile, message: &SchemaMessage) -> Result<(), ScanError> {
    let invalid = |reason: String| ScanError::InvalidIdent {
        file: file.name.clone(),
        reason,
    };

    if message.ident.is_empty() {
        return Err(invalid("message ident is empty".to_string()));
    }
    if message.ident.len() > crate::MAX_MESSAGE_NAME_LEN || !message.ident.is_ascii() {
        return Err(invalid(format!(
            "message ident '{}' must be ASCII and at most {} bytes",
            message.ident,
            crate::MAX_MESSAGE_NAME_LEN
        )));
    }

    for field in &message.fields {
        if field.ident.is_empty() {
            return Err(invalid(format!("field ident in '{}' is empty", message.ident)));
        }
        if field.ident.len() > crate::MAX_FIELD_NAME_LEN || !field.ident.is_ascii() {
            return Err(invalid(format!(
                "field ident '{}' in '{}' must be ASCII and at most {} bytes",
                field.ident,
                message.ident,
                crate::MAX_FIELD_NAME_LEN
            )));
        }
    }

    Ok(())
}

/// Fully qualify a message identifier under its declaring package.
fn qualify(package: &str, ident: &str) -> String {
    if package.is_empty() {
        format!(".{ident}")
    } else {
        format!(".{package}.{ident}")
    }
}

fn resolve_field(
    file: &SchemaFile,
    message: &SchemaMessage,
    field: &SchemaField,
    index: &BTreeMap<String, NodeId>,
) -> Result<ResolvedField, ScanError> {
    let item = match &field.value.item {
        FieldItem::Primitive(prim) => ResolvedItem::Primitive(*prim),
        FieldItem::Message(referent) => {
            let target = resolve_reference(referent, &file.package, index).ok_or_else(|| {
                ScanError::UnresolvedReference {
                    message: qualify(&file.package, &message.ident),
                    field: field.ident.clone(),
                    referent: referent.clone(),
                }
            })?;

            ResolvedItem::Node(target)
        }
    };

    Ok(ResolvedField {
        ident: field.ident.clone(),
        cardinality: field.value.cardinality,
        item,
        boxed: false,
    })
}

/// Proto reference resolution: a leading dot is absolute; a relative name
/// is tried against the declaring package innermost-first, falling back to
/// the root scope (which is where imported packages are found).
fn resolve_reference(
    referent: &str,
    package: &str,
    index: &BTreeMap<String, NodeId>,
) -> Option<NodeId> {
    if referent.starts_with('.') {
        return index.get(referent).copied();
    }

    let mut scope: Vec<&str> = if package.is_empty() {
        Vec::new()
    } else {
        package.split('.').collect()
    };

    loop {
        let candidate = if scope.is_empty() {
            format!(".{referent}")
        } else {
            format!(".{}.{referent}", scope.join("."))
        };

        if let Some(id) = index.get(&candidate) {
            return Some(*id);
        }
        if scope.pop().is_none() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget_file() -> SchemaFile {
        SchemaFile::new("widgets/widget.proto", "example.widgets").message(
            SchemaMessage::new("Widget")
                .field(SchemaField::primitive("name", Primitive::String))
                .field(SchemaField::primitive("size", Primitive::Int32)),
        )
    }

    #[test]
    fn nodes_follow_file_then_declaration_order() {
        let files = vec![
            widget_file(),
            SchemaFile::new("widgets/extra.proto", "example.widgets")
                .message(SchemaMessage::new("Gear"))
                .message(SchemaMessage::new("Axle")),
        ];

        let graph = Builder::build(&files).unwrap();
        let order: Vec<&str> = graph.nodes().map(|n| n.ident.as_str()).collect();
        assert_eq!(order, ["Widget", "Gear", "Axle"]);
    }

    #[test]
    fn resolves_relative_reference_in_same_package() {
        let files = vec![
            widget_file().message(
                SchemaMessage::new("Holder").field(SchemaField::message("widget", "Widget")),
            ),
        ];

        let graph = Builder::build(&files).unwrap();
        let holder = graph.get(".example.widgets.Holder").unwrap();
        let ResolvedItem::Node(target) = holder.fields[0].item else {
            panic!("expected a node reference");
        };
        assert_eq!(graph.node(target).ident, "Widget");
    }

    #[test]
    fn resolves_absolute_reference_across_files() {
        let files = vec![
            widget_file(),
            SchemaFile::new("factory/factory.proto", "example.factory")
                .import("widgets/widget.proto")
                .message(
                    SchemaMessage::new("Factory")
                        .field(SchemaField::message("output", ".example.widgets.Widget")),
                ),
        ];

        let graph = Builder::build(&files).unwrap();
        let factory = graph.get(".example.factory.Factory").unwrap();
        let ResolvedItem::Node(target) = factory.fields[0].item else {
            panic!("expected a node reference");
        };
        assert_eq!(graph.node(target).qualified, ".example.widgets.Widget");
    }

    #[test]
    fn relative_reference_falls_back_to_root_scope() {
        let files = vec![
            widget_file(),
            SchemaFile::new("factory/factory.proto", "example.factory").message(
                SchemaMessage::new("Factory")
                    .field(SchemaField::message("output", "example.widgets.Widget")),
            ),
        ];

        let graph = Builder::build(&files).unwrap();
        assert!(graph.get(".example.factory.Factory").is_some());
    }

    #[test]
    fn unresolved_reference_names_field_and_referent() {
        let files = vec![widget_file().message(
            SchemaMessage::new("Holder").field(SchemaField::message("widget", "Missing")),
        )];

        let err = Builder::build(&files).unwrap_err();
        match err {
            ScanError::UnresolvedReference {
                message,
                field,
                referent,
            } => {
                assert_eq!(message, ".example.widgets.Holder");
                assert_eq!(field, "widget");
                assert_eq!(referent, "Missing");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_qualified_name_is_rejected() {
        let files = vec![
            widget_file(),
            SchemaFile::new("widgets/copy.proto", "example.widgets")
                .message(SchemaMessage::new("Widget")),
        ];

        let err = Builder::build(&files).unwrap_err();
        assert!(matches!(err, ScanError::DuplicateType { .. }));
    }

    #[test]
    fn empty_message_ident_is_rejected() {
        let files = vec![SchemaFile::new("w.proto", "pkg").message(SchemaMessage::new(""))];

        let err = Builder::build(&files).unwrap_err();
        assert!(matches!(err, ScanError::InvalidIdent { .. }));
    }

    #[test]
    fn oversized_field_ident_is_rejected() {
        let files = vec![SchemaFile::new("w.proto", "pkg").message(
            SchemaMessage::new("Widget")
                .field(SchemaField::primitive("f".repeat(65), Primitive::Bool)),
        )];

        let err = Builder::build(&files).unwrap_err();
        assert!(matches!(err, ScanError::InvalidIdent { .. }));
    }

    #[test]
    fn back_references_are_recorded() {
        let files = vec![
            widget_file().message(
                SchemaMessage::new("Holder").field(SchemaField::message("widget", "Widget")),
            ),
        ];

        let graph = Builder::build(&files).unwrap();
        let widget = graph.get(".example.widgets.Widget").unwrap();
        let holder = graph.get(".example.widgets.Holder").unwrap();
        assert_eq!(widget.referenced_by, vec![holder.id]);
    }
}
