use crate::{
    classify::GeneratedType,
    emit::{
        EmitContext, EmitError,
        deep_copy::{self, Embedding},
    },
};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

/// A plain data struct: no metadata embedding and no kind accessor, but it
/// still carries the deep-copy pair so objects referencing it can recurse.
pub(crate) fn generate(ctx: &EmitContext, ty: &GeneratedType) -> Result<TokenStream, EmitError> {
    let ident = format_ident!("{}", ty.name.type_name);
    let node = ctx.node(ty.node);
    let fields = ctx.field_decls(ty, node)?;
    let copy = deep_copy::methods(ctx, ty, node, &Embedding::None)?;

    Ok(quote! {
        #[derive(Debug, Default, PartialEq)]
        pub struct #ident {
            #(#fields,)*
        }

        impl #ident {
            #copy
        }
    })
}
