use crate::prelude::*;

///
/// SchemaFile
///
/// One parsed compilation unit as handed over by the host's schema parser.
/// Immutable for the duration of a generation run; message order is the
/// declaration order in the source text.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SchemaFile {
    pub name: String,
    pub package: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,

    pub messages: Vec<SchemaMessage>,
}

impl SchemaFile {
    #[must_use]
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            imports: Vec::new(),
            messages: Vec::new(),
        }
    }

    #[must_use]
    pub fn import(mut self, file: impl Into<String>) -> Self {
        self.imports.push(file.into());
        self
    }

    #[must_use]
    pub fn message(mut self, message: SchemaMessage) -> Self {
        self.messages.push(message);
        self
    }
}
