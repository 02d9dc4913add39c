use super::field::SchemaField;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Portable form schema: `{"fields": [...]}`.
///
/// `{}` is a valid, empty schema. Keys other than `fields` are kept as-is so
/// editing a schema never drops data the editor does not understand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<SchemaField>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FormSchema {
    pub fn with_fields(fields: Vec<SchemaField>) -> Self {
        Self {
            fields: Some(fields),
            extra: Map::new(),
        }
    }

    /// True for `{}`.
    pub fn is_empty(&self) -> bool {
        self.fields.is_none() && self.extra.is_empty()
    }

    pub fn fields(&self) -> &[SchemaField] {
        self.fields.as_deref().unwrap_or(&[])
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields().iter().map(|f| f.name.as_str()).collect()
    }
}
