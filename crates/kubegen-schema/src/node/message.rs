use crate::prelude::*;
use std::collections::BTreeMap;

///
/// SchemaMessage
///
/// A named record type plus the generation directives attached to it
/// (annotation key → value). An annotation present with any value other
/// than `"false"` counts as a set marker.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SchemaMessage {
    pub ident: String,
    pub fields: Vec<SchemaField>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl SchemaMessage {
    #[must_use]
    pub fn new(ident: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            fields: Vec::new(),
            annotations: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, field: SchemaField) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn annotate(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn has_marker(&self, key: &str) -> bool {
        self.annotation(key).is_some_and(|v| v != "false")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_is_set_unless_false() {
        let message = SchemaMessage::new("Widget")
            .annotate("kube:object", "true")
            .annotate("kube:list", "false");

        assert!(message.has_marker("kube:object"));
        assert!(!message.has_marker("kube:list"));
        assert!(!message.has_marker("kube:kind"));
    }

    #[test]
    fn descriptor_round_trips_through_serde() {
        let file = SchemaFile::new("w.proto", "pkg").message(
            SchemaMessage::new("Widget")
                .annotate("kube:object", "true")
                .field(SchemaField::primitive("size", Primitive::Int32))
                .field(SchemaField::message("next", "Widget").optional()),
        );

        let json = serde_json::to_string(&file).unwrap();
        let back: SchemaFile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.messages[0].ident, "Widget");
        assert_eq!(back.messages[0].fields.len(), 2);
        assert!(back.messages[0].has_marker("kube:object"));
    }
}
