use crate::{
    classify::GeneratedType,
    emit::{EmitContext, EmitError},
};
use kubegen_schema::{
    graph::{ResolvedField, ResolvedItem, TypeNode},
    types::Cardinality,
};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

/// What the generated type embeds ahead of its declared fields.
pub(crate) enum Embedding {
    Object,
    List,
    None,
}

/// The `deep_copy` / `deep_copy_into` method pair for one generated type.
///
/// `deep_copy_into` populates a pre-allocated target, which is what makes
/// cyclic and self-referential graphs safe: indirected fields allocate the
/// box first and recurse into it afterwards, so construction depth tracks
/// the value being copied, never the type graph.
pub(crate) fn methods(
    ctx: &EmitContext,
    from: &GeneratedType,
    node: &TypeNode,
    embedding: &Embedding,
) -> Result<TokenStream, EmitError> {
    let meta = match embedding {
        Embedding::Object | Embedding::List => quote! {
            out.type_meta = self.type_meta.clone();
            out.metadata = self.metadata.clone();
        },
        Embedding::None => quote!(),
    };

    let fields = node
        .fields
        .iter()
        .map(|field| copy_statement(ctx, from, field))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(quote! {
        /// A fully independent duplicate of this value.
        #[must_use]
        pub fn deep_copy(&self) -> Self {
            let mut out = Self::default();
            self.deep_copy_into(&mut out);
            out
        }

        /// Copy every owned field into `out`, overwriting its contents.
        pub fn deep_copy_into(&self, out: &mut Self) {
            #meta
            #(#fields)*
        }
    })
}

/// One copy statement per declared field, in declaration order.
fn copy_statement(
    ctx: &EmitContext,
    from: &GeneratedType,
    field: &ResolvedField,
) -> Result<TokenStream, EmitError> {
    let ident = format_ident!("{}", field.ident);

    let tokens = match field.item {
        ResolvedItem::Primitive(prim) => {
            // A Vec of any scalar is not Copy; an Option of a Copy scalar is.
            if prim.supports_copy() && field.cardinality != Cardinality::Many {
                quote! { out.#ident = self.#ident; }
            } else {
                quote! { out.#ident = self.#ident.clone(); }
            }
        }
        ResolvedItem::Node(target) => {
            let path = ctx.type_path(from, ctx.generated(target)?);

            if field.boxed {
                quote! {
                    out.#ident = None;
                    if let Some(value) = &self.#ident {
                        let mut copied = Box::new(#path::default());
                        value.deep_copy_into(&mut copied);
                        out.#ident = Some(copied);
                    }
                }
            } else {
                match field.cardinality {
                    Cardinality::One => quote! {
                        self.#ident.deep_copy_into(&mut out.#ident);
                    },
                    Cardinality::Opt => quote! {
                        out.#ident = None;
                        if let Some(value) = &self.#ident {
                            let mut copied = #path::default();
                            value.deep_copy_into(&mut copied);
                            out.#ident = Some(copied);
                        }
                    },
                    Cardinality::Many => quote! {
                        out.#ident = Vec::with_capacity(self.#ident.len());
                        for value in &self.#ident {
                            let mut copied = #path::default();
                            value.deep_copy_into(&mut copied);
                            out.#ident.push(copied);
                        }
                    },
                }
            }
        }
    };

    Ok(tokens)
}
