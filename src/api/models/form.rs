use super::common::{RecordId, deserialize_null_default, deserialize_timestamp};
use super::schema::FormSchema;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A named, versioned form as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_version", deserialize_with = "deserialize_version")]
    pub version: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub form_schema: FormSchema,
    #[serde(default = "default_true", deserialize_with = "deserialize_active")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub is_deleted: bool,
    #[serde(
        default,
        deserialize_with = "deserialize_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl Form {
    pub fn status_label(&self) -> &'static str {
        if self.is_active { "Active" } else { "Inactive" }
    }
}

/// Payload for creating or replacing a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDraft {
    pub name: String,
    pub description: String,
    pub version: String,
    pub form_schema: FormSchema,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl FormDraft {
    pub fn new(name: impl Into<String>, version: impl Into<String>, form_schema: FormSchema) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            version: version.into(),
            form_schema,
            is_active: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Draft pre-filled from an existing record, for editing.
    pub fn from_form(form: &Form) -> Self {
        Self {
            name: form.name.clone(),
            description: form.description.clone().unwrap_or_default(),
            version: form.version.clone(),
            form_schema: form.form_schema.clone(),
            is_active: None,
        }
    }
}

impl Default for FormDraft {
    fn default() -> Self {
        Self::new("", default_version(), FormSchema::default())
    }
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_true() -> bool {
    true
}

// Older records carry explicit nulls; treat them like missing keys.
fn deserialize_version<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|v| !v.is_empty())
        .unwrap_or_else(default_version))
}

fn deserialize_active<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_else(default_true))
}
