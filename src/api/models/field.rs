//! Form field definitions.
//!
//! Only `select` and `radio` fields carry an option list. [`FieldKind`]
//! encodes that so a text field can never hold stale options; the flat wire
//! shape (`type` plus optional `options`) is handled by [`RawField`].

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Written in lowercase; read case-insensitively through [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Email,
    Phone,
    Date,
    Textarea,
    Select,
    Checkbox,
    Radio,
}

impl FieldType {
    /// Every field type, in the order the builder offers them.
    pub const ALL: [FieldType; 9] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Email,
        FieldType::Phone,
        FieldType::Date,
        FieldType::Textarea,
        FieldType::Select,
        FieldType::Checkbox,
        FieldType::Radio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Date => "date",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Checkbox => "checkbox",
            FieldType::Radio => "radio",
        }
    }

    /// Caption shown to form authors.
    pub fn display_label(&self) -> &'static str {
        match self {
            FieldType::Text => "Text",
            FieldType::Number => "Number",
            FieldType::Email => "Email",
            FieldType::Phone => "Phone",
            FieldType::Date => "Date",
            FieldType::Textarea => "Textarea",
            FieldType::Select => "Dropdown",
            FieldType::Checkbox => "Checkbox",
            FieldType::Radio => "Radio",
        }
    }

    pub fn takes_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::Radio)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| format!("Unknown field type: {}", s))
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Field type together with the payload only some types carry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    Number,
    Email,
    Phone,
    Date,
    Textarea,
    Select(Vec<String>),
    Checkbox,
    Radio(Vec<String>),
}

impl FieldKind {
    /// Kind for `field_type` with no options.
    pub fn empty(field_type: FieldType) -> Self {
        Self::with_options(field_type, Vec::new())
    }

    /// Kind for `field_type`; `options` is dropped for types that take none.
    pub fn with_options(field_type: FieldType, options: Vec<String>) -> Self {
        match field_type {
            FieldType::Text => FieldKind::Text,
            FieldType::Number => FieldKind::Number,
            FieldType::Email => FieldKind::Email,
            FieldType::Phone => FieldKind::Phone,
            FieldType::Date => FieldKind::Date,
            FieldType::Textarea => FieldKind::Textarea,
            FieldType::Select => FieldKind::Select(options),
            FieldType::Checkbox => FieldKind::Checkbox,
            FieldType::Radio => FieldKind::Radio(options),
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            FieldKind::Text => FieldType::Text,
            FieldKind::Number => FieldType::Number,
            FieldKind::Email => FieldType::Email,
            FieldKind::Phone => FieldType::Phone,
            FieldKind::Date => FieldType::Date,
            FieldKind::Textarea => FieldType::Textarea,
            FieldKind::Select(_) => FieldType::Select,
            FieldKind::Checkbox => FieldType::Checkbox,
            FieldKind::Radio(_) => FieldType::Radio,
        }
    }

    /// Options of a select/radio field, `None` for every other type.
    pub fn options(&self) -> Option<&[String]> {
        match self {
            FieldKind::Select(options) | FieldKind::Radio(options) => Some(options),
            _ => None,
        }
    }

    /// Replace the option list. Returns false (and changes nothing) when the
    /// kind takes no options.
    pub fn set_options(&mut self, options: Vec<String>) -> bool {
        match self {
            FieldKind::Select(current) | FieldKind::Radio(current) => {
                *current = options;
                true
            }
            _ => false,
        }
    }
}

/// One field as persisted in a form schema.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawField", into = "RawField")]
pub struct SchemaField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: Option<String>,
}

impl SchemaField {
    pub fn new(name: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind: FieldKind::empty(field_type),
            required: false,
            placeholder: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into()).filter(|p| !p.is_empty());
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.kind
            .set_options(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }
}

/// Wire shape of a field: `{name, label, type, required, placeholder?, options?}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawField {
    #[serde(default)]
    name: String,
    #[serde(default)]
    label: String,
    #[serde(rename = "type", default = "default_field_type")]
    field_type: FieldType,
    #[serde(default)]
    required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<String>>,
}

fn default_field_type() -> FieldType {
    FieldType::Text
}

impl From<RawField> for SchemaField {
    fn from(raw: RawField) -> Self {
        Self {
            name: raw.name,
            label: raw.label,
            kind: FieldKind::with_options(raw.field_type, raw.options.unwrap_or_default()),
            required: raw.required,
            placeholder: raw.placeholder.filter(|p| !p.is_empty()),
        }
    }
}

impl From<SchemaField> for RawField {
    fn from(field: SchemaField) -> Self {
        let field_type = field.kind.field_type();
        let options = field.kind.options().map(<[String]>::to_vec);
        Self {
            name: field.name,
            label: field.label,
            field_type,
            required: field.required,
            placeholder: field.placeholder.filter(|p| !p.is_empty()),
            options,
        }
    }
}

/// Editor-only handle of a field. Never serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(Uuid);

impl FieldId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FieldId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A field inside a builder session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub id: FieldId,
    pub field: SchemaField,
}

impl FieldDefinition {
    /// Blank text field with a fresh id.
    pub fn new() -> Self {
        Self {
            id: FieldId::new(),
            field: SchemaField::default(),
        }
    }

    /// Wrap a persisted field, assigning it a fresh id.
    pub fn from_persisted(field: SchemaField) -> Self {
        Self {
            id: FieldId::new(),
            field,
        }
    }

    pub fn to_persisted(&self) -> SchemaField {
        let mut field = self.field.clone();
        field.placeholder = field.placeholder.filter(|p| !p.is_empty());
        field
    }
}

impl Default for FieldDefinition {
    fn default() -> Self {
        Self::new()
    }
}
