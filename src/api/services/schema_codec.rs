//! Form schema serializer and parser.
//!
//! The text form of a schema is pretty-printed JSON, the same document the
//! backend stores in `form_schema`.

use crate::models::{FieldDefinition, FormSchema};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid schema at line {line}, column {column}: {message}")]
pub struct SchemaParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl From<serde_json::Error> for SchemaParseError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

/// Canonical persisted schema for a builder's fields. Editor ids are
/// dropped, empty placeholders omitted, options kept only for select/radio.
pub fn to_persisted(fields: &[FieldDefinition]) -> FormSchema {
    FormSchema::with_fields(fields.iter().map(FieldDefinition::to_persisted).collect())
}

/// Pretty-printed text of a schema.
pub fn to_text(schema: &FormSchema) -> String {
    // Serializing plain strings, bools and maps cannot fail.
    serde_json::to_string_pretty(schema).unwrap_or_else(|_| "{}".to_string())
}

/// Parse schema text. Blank text is the empty schema `{}`.
pub fn from_text(text: &str) -> Result<FormSchema, SchemaParseError> {
    if text.trim().is_empty() {
        return Ok(FormSchema::default());
    }
    Ok(serde_json::from_str(text)?)
}

/// One option per non-blank line, in order.
pub fn parse_options(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Inverse of [`parse_options`] for display in a text area.
pub fn options_text(options: &[String]) -> String {
    options.join("\n")
}

/// Raw-text editing buffer.
///
/// Keeps the text exactly as typed next to the last schema value that
/// parsed. Text that does not parse never replaces that value.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSchemaEditor {
    text: String,
    value: FormSchema,
    error: Option<SchemaParseError>,
}

impl RawSchemaEditor {
    pub fn new(value: FormSchema) -> Self {
        Self {
            text: to_text(&value),
            value,
            error: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Last value that parsed successfully.
    pub fn value(&self) -> &FormSchema {
        &self.value
    }

    /// Error from the most recent edit, if it did not parse.
    pub fn error(&self) -> Option<&SchemaParseError> {
        self.error.as_ref()
    }

    /// Replace the buffer. Returns true when the new text parsed and became
    /// the current value.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        self.text = text.into();
        match from_text(&self.text) {
            Ok(value) => {
                self.value = value;
                self.error = None;
                true
            }
            Err(e) => {
                debug!("Keeping previous schema, edit did not parse: {}", e);
                self.error = Some(e);
                false
            }
        }
    }

    pub fn into_value(self) -> FormSchema {
        self.value
    }
}
