//! Visual schema builder.
//!
//! Holds the working copy of a form's fields for one edit session. Every
//! mutation re-derives the persisted schema and publishes it on a
//! [`tokio::sync::watch`] channel, which is how the owning editor learns
//! about changes.

use super::schema_codec::{parse_options, to_persisted};
use crate::models::{FieldDefinition, FieldId, FieldKind, FieldType, FormSchema};
use serde_json::{Map, Value};
use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Partial update of one field. Unset members are left alone.
///
/// Setting `field_type` always resets the options; `options` in the same
/// patch is applied after that reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPatch {
    pub name: Option<String>,
    pub label: Option<String>,
    pub field_type: Option<FieldType>,
    pub required: Option<bool>,
    /// `Some("")` clears the placeholder.
    pub placeholder: Option<String>,
    pub options: Option<Vec<String>>,
}

impl FieldPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    fn apply(self, definition: &mut FieldDefinition) {
        let field = &mut definition.field;
        if let Some(name) = self.name {
            field.name = name;
        }
        if let Some(label) = self.label {
            field.label = label;
        }
        if let Some(field_type) = self.field_type {
            field.kind = FieldKind::empty(field_type);
        }
        if let Some(required) = self.required {
            field.required = required;
        }
        if let Some(placeholder) = self.placeholder {
            field.placeholder = Some(placeholder).filter(|p| !p.is_empty());
        }
        if let Some(options) = self.options {
            field.kind.set_options(options);
        }
    }
}

#[derive(Debug)]
pub struct SchemaBuilder {
    fields: Vec<FieldDefinition>,
    editing: Option<FieldId>,
    // Top-level schema keys other than `fields`, carried through untouched.
    extra: Map<String, Value>,
    changes: watch::Sender<FormSchema>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::from_schema(&FormSchema::default())
    }

    /// Start a session from a persisted schema. Every field gets a fresh id.
    pub fn from_schema(schema: &FormSchema) -> Self {
        let (changes, _) = watch::channel(schema.clone());
        Self {
            fields: schema
                .fields()
                .iter()
                .cloned()
                .map(FieldDefinition::from_persisted)
                .collect(),
            editing: None,
            extra: schema.extra.clone(),
            changes,
        }
    }

    /// Receiver that sees the persisted schema after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<FormSchema> {
        self.changes.subscribe()
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn field(&self, id: FieldId) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn position(&self, id: FieldId) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The field whose editor is open, if any.
    pub fn editing(&self) -> Option<FieldId> {
        self.editing
    }

    /// Persisted form of the current fields.
    pub fn schema(&self) -> FormSchema {
        let mut schema = to_persisted(&self.fields);
        schema.extra = self.extra.clone();
        schema
    }

    /// Append a blank field and open its editor.
    pub fn add_field(&mut self) -> FieldId {
        let definition = FieldDefinition::new();
        let id = definition.id;
        self.fields.push(definition);
        self.editing = Some(id);
        debug!(field_id = %id, "Added field");
        self.notify();
        id
    }

    /// Merge `patch` into the field with `id`. Returns false when there is
    /// no such field.
    pub fn update_field(&mut self, id: FieldId, patch: FieldPatch) -> bool {
        let Some(definition) = self.fields.iter_mut().find(|f| f.id == id) else {
            return false;
        };
        patch.apply(definition);
        self.notify();
        true
    }

    /// Replace a select/radio field's options from a multi-line text block.
    pub fn set_options_text(&mut self, id: FieldId, text: &str) -> bool {
        self.update_field(
            id,
            FieldPatch {
                options: Some(parse_options(text)),
                ..FieldPatch::default()
            },
        )
    }

    /// Remove the field with `id` and close the field editor.
    pub fn delete_field(&mut self, id: FieldId) -> bool {
        self.editing = None;
        let before = self.fields.len();
        self.fields.retain(|f| f.id != id);
        if self.fields.len() == before {
            return false;
        }
        debug!(field_id = %id, "Deleted field");
        self.notify();
        true
    }

    /// Swap the field at `index` with its neighbour. Moving past either end
    /// leaves the order unchanged and returns false.
    pub fn move_field(&mut self, index: usize, direction: Direction) -> bool {
        let target = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => index.checked_add(1),
        };
        let Some(target) = target.filter(|t| *t < self.fields.len()) else {
            return false;
        };
        if index >= self.fields.len() {
            return false;
        }
        self.fields.swap(index, target);
        self.notify();
        true
    }

    /// Open the editor for `id`, or close it if it is already open.
    pub fn toggle_editing(&mut self, id: FieldId) {
        self.editing = if self.editing == Some(id) {
            None
        } else {
            Some(id)
        };
    }

    fn notify(&self) {
        self.changes.send_replace(self.schema());
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
