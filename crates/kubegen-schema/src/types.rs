use crate::prelude::*;
use derive_more::{Display, FromStr};
use proc_macro2::TokenStream;
use quote::quote;

///
/// Cardinality
///

#[derive(
    Clone, Copy, Default, Debug, Deserialize, Display, Eq, FromStr, PartialEq, Serialize,
)]
pub enum Cardinality {
    #[default]
    One,
    Opt,
    Many,
}

///
/// Primitive
/// the proto3 scalar set
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, PartialEq, Serialize)]
#[remain::sorted]
pub enum Primitive {
    Bool,
    Bytes,
    Double,
    Fixed32,
    Fixed64,
    Float,
    Int32,
    Int64,
    Sfixed32,
    Sfixed64,
    Sint32,
    Sint64,
    String,
    Uint32,
    Uint64,
}

impl Primitive {
    /// Whether the mapped Rust type is `Copy` (everything but the heap scalars).
    #[must_use]
    pub const fn supports_copy(self) -> bool {
        !matches!(self, Self::Bytes | Self::String)
    }

    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Double | Self::Float)
    }

    #[must_use]
    pub const fn is_signed_int(self) -> bool {
        matches!(
            self,
            Self::Int32 | Self::Int64 | Self::Sfixed32 | Self::Sfixed64 | Self::Sint32 | Self::Sint64
        )
    }

    #[must_use]
    pub const fn is_unsigned_int(self) -> bool {
        matches!(self, Self::Fixed32 | Self::Fixed64 | Self::Uint32 | Self::Uint64)
    }

    #[must_use]
    pub const fn is_int(self) -> bool {
        self.is_signed_int() || self.is_unsigned_int()
    }

    /// The Rust type the scalar maps to in generated code.
    #[must_use]
    pub fn as_type(self) -> TokenStream {
        match self {
            Self::Bool => quote!(bool),
            Self::Bytes => quote!(Vec<u8>),
            Self::Double => quote!(f64),
            Self::Fixed32 | Self::Uint32 => quote!(u32),
            Self::Fixed64 | Self::Uint64 => quote!(u64),
            Self::Float => quote!(f32),
            Self::Int32 | Self::Sfixed32 | Self::Sint32 => quote!(i32),
            Self::Int64 | Self::Sfixed64 | Self::Sint64 => quote!(i64),
            Self::String => quote!(String),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_parses_from_variant_name() {
        assert_eq!("Int32".parse::<Primitive>().ok(), Some(Primitive::Int32));
        assert_eq!("String".parse::<Primitive>().ok(), Some(Primitive::String));
        assert!("int".parse::<Primitive>().is_err());
    }

    #[test]
    fn heap_scalars_are_not_copy() {
        assert!(!Primitive::String.supports_copy());
        assert!(!Primitive::Bytes.supports_copy());
        assert!(Primitive::Int32.supports_copy());
        assert!(Primitive::Bool.supports_copy());
    }

    #[test]
    fn scalar_type_mapping_is_the_proto3_one() {
        assert_eq!(Primitive::Sint64.as_type().to_string(), "i64");
        assert_eq!(Primitive::Fixed32.as_type().to_string(), "u32");
        assert_eq!(Primitive::Bytes.as_type().to_string(), "Vec < u8 >");
    }
}
