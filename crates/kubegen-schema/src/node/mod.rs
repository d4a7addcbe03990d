mod field;
mod file;
mod message;

pub use field::{FieldItem, FieldValue, SchemaField};
pub use file::SchemaFile;
pub use message::SchemaMessage;
