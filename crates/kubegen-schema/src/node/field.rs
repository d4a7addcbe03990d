use crate::prelude::*;

///
/// SchemaField
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SchemaField {
    pub ident: String,
    pub value: FieldValue,
}

impl SchemaField {
    /// A singular scalar field.
    #[must_use]
    pub fn primitive(ident: impl Into<String>, prim: Primitive) -> Self {
        Self {
            ident: ident.into(),
            value: FieldValue {
                cardinality: Cardinality::One,
                item: FieldItem::Primitive(prim),
            },
        }
    }

    /// A singular field referencing another message by its declared name.
    /// A leading dot makes the reference absolute; otherwise it is resolved
    /// against the declaring package, innermost scope first.
    #[must_use]
    pub fn message(ident: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            value: FieldValue {
                cardinality: Cardinality::One,
                item: FieldItem::Message(target.into()),
            },
        }
    }

    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.value.cardinality = Cardinality::Opt;
        self
    }

    #[must_use]
    pub const fn repeated(mut self) -> Self {
        self.value.cardinality = Cardinality::Many;
        self
    }
}

///
/// FieldValue
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FieldValue {
    #[serde(default)]
    pub cardinality: Cardinality,
    pub item: FieldItem,
}

///
/// FieldItem
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub enum FieldItem {
    Primitive(Primitive),
    Message(String),
}
