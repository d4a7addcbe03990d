//! The emitter: classified types → byte-deterministic generated source.

mod deep_copy;
mod list;
mod object;
mod plain;

use crate::{
    Cancel,
    classify::{GeneratedType, Role},
};
use kubegen_schema::graph::{NodeId, ResolvedField, ResolvedItem, TypeGraph, TypeNode};
use kubegen_schema::types::Cardinality;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error as ThisError;
use tracing::debug;

/// Header stamped on every generated file.
pub const GENERATED_BY: &str = "// Code generated by kubegen. DO NOT EDIT.";

///
/// EmitError
///

#[derive(Debug, ThisError)]
pub enum EmitError {
    /// A node reached the emitter without a classified counterpart. The
    /// scanner and classifier guarantee this cannot happen for valid input,
    /// so it is always a programming defect and never skipped.
    #[error("internal consistency: no generated type for '{qualified}'")]
    InternalConsistency { qualified: String },

    #[error("generated source for '{path}' does not parse: {source}")]
    Render { path: String, source: syn::Error },

    #[error("generation cancelled during emission")]
    Cancelled,
}

///
/// EmittedFile
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EmittedFile {
    pub path: String,
    pub source: String,

    /// Target type names contained in this file, in emission order.
    pub types: Vec<String>,
}

/// Emit one file per target path, grouping types in first-seen order.
///
/// Given the same ordered `types` sequence the output is byte-identical
/// across runs. The cancellation token is checked once per type.
pub fn emit(
    graph: &TypeGraph,
    types: &[GeneratedType],
    cancel: &Cancel,
) -> Result<Vec<EmittedFile>, EmitError> {
    let ctx = EmitContext::new(graph, types);

    let mut order: Vec<&str> = Vec::new();
    let mut groups: BTreeMap<&str, Vec<&GeneratedType>> = BTreeMap::new();
    for ty in types {
        let path = ty.name.file_path.as_str();
        if !groups.contains_key(path) {
            order.push(path);
        }
        groups.entry(path).or_default().push(ty);
    }

    let mut out = Vec::with_capacity(order.len());
    for path in order {
        let mut items = TokenStream::new();
        let mut contained = Vec::new();

        for ty in &groups[path] {
            if cancel.is_cancelled() {
                return Err(EmitError::Cancelled);
            }
            debug!(qualified = %ty.qualified, role = %ty.role, "emitting type");

            items.extend(match ty.role {
                Role::KubeObject => object::generate(&ctx, ty)?,
                Role::KubeList => list::generate(&ctx, ty)?,
                Role::PlainStruct => plain::generate(&ctx, ty)?,
            });
            contained.push(ty.name.type_name.clone());
        }

        out.push(EmittedFile {
            path: path.to_string(),
            source: render(path, items)?,
            types: contained,
        });
    }

    Ok(out)
}

fn render(path: &str, items: TokenStream) -> Result<String, EmitError> {
    let file: syn::File = syn::parse2(items).map_err(|source| EmitError::Render {
        path: path.to_string(),
        source,
    })?;

    Ok(format!("{GENERATED_BY}\n\n{}", prettyplease::unparse(&file)))
}

///
/// EmitContext
/// read-only view shared by the per-role generators
///

pub(crate) struct EmitContext<'a> {
    graph: &'a TypeGraph,
    by_node: BTreeMap<NodeId, &'a GeneratedType>,
}

impl<'a> EmitContext<'a> {
    fn new(graph: &'a TypeGraph, types: &'a [GeneratedType]) -> Self {
        Self {
            graph,
            by_node: types.iter().map(|ty| (ty.node, ty)).collect(),
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> &'a TypeNode {
        self.graph.node(id)
    }

    pub(crate) fn generated(&self, id: NodeId) -> Result<&'a GeneratedType, EmitError> {
        self.by_node
            .get(&id)
            .copied()
            .ok_or_else(|| EmitError::InternalConsistency {
                qualified: self.graph.node(id).qualified.clone(),
            })
    }

    /// How `target` is spelled from inside `from`'s file: a bare identifier
    /// within the same file, a crate path through the target package
    /// otherwise.
    pub(crate) fn type_path(
        &self,
        from: &GeneratedType,
        target: &GeneratedType,
    ) -> TokenStream {
        let ident = format_ident!("{}", target.name.type_name);
        if from.name.file_path == target.name.file_path {
            return quote!(#ident);
        }

        let segments = target
            .name
            .package
            .split('.')
            .filter(|s| !s.is_empty())
            .map(|s| format_ident!("{s}"));

        quote!(crate::#(#segments::)*#ident)
    }

    /// Declared struct fields, declaration order.
    pub(crate) fn field_decls(
        &self,
        from: &GeneratedType,
        node: &TypeNode,
    ) -> Result<Vec<TokenStream>, EmitError> {
        node.fields
            .iter()
            .map(|field| {
                let ident = format_ident!("{}", field.ident);
                let ty = self.field_type(from, field)?;

                Ok(quote!(pub #ident: #ty))
            })
            .collect()
    }

    pub(crate) fn field_type(
        &self,
        from: &GeneratedType,
        field: &ResolvedField,
    ) -> Result<TokenStream, EmitError> {
        let base = match field.item {
            ResolvedItem::Primitive(prim) => prim.as_type(),
            ResolvedItem::Node(target) => self.type_path(from, self.generated(target)?),
        };

        if field.boxed {
            return Ok(quote!(Option<Box<#base>>));
        }

        Ok(match field.cardinality {
            Cardinality::One => base,
            Cardinality::Opt => quote!(Option<#base>),
            Cardinality::Many => quote!(Vec<#base>),
        })
    }
}
