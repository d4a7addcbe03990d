use crate::{
    classify::GeneratedType,
    emit::{
        EmitContext, EmitError,
        deep_copy::{self, Embedding},
    },
};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

/// A kube list: list-metadata embedding plus the wrapped item sequence.
/// The deep copy duplicates items element-by-element through the element
/// type's own generated deep copy, preserving length and order; an empty
/// sequence copies to an empty sequence.
pub(crate) fn generate(ctx: &EmitContext, ty: &GeneratedType) -> Result<TokenStream, EmitError> {
    let ident = format_ident!("{}", ty.name.type_name);
    let kind = ty.kind.as_str();
    let node = ctx.node(ty.node);
    let fields = ctx.field_decls(ty, node)?;
    let copy = deep_copy::methods(ctx, ty, node, &Embedding::List)?;

    Ok(quote! {
        #[derive(Debug, Default, PartialEq)]
        pub struct #ident {
            pub type_meta: ::kubegen::meta::TypeMeta,
            pub metadata: ::kubegen::meta::ListMeta,
            #(#fields,)*
        }

        impl #ident {
            /// The list's kind descriptor.
            #[must_use]
            pub const fn kind(&self) -> &'static str {
                #kind
            }

            #copy
        }
    })
}
