//! Data-quality warnings for a form schema.
//!
//! Nothing here rejects a schema. Duplicate or empty names are accepted by
//! the builder and the catalog; the lint only reports them so an author can
//! fix them before the mobile client has to cope.

use crate::models::FormSchema;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaWarning {
    EmptyName { index: usize },
    EmptyLabel { index: usize },
    DuplicateName { name: String, indexes: Vec<usize> },
    NameNotSnakeCase { index: usize, name: String },
    MissingOptions { index: usize, name: String },
}

impl fmt::Display for SchemaWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaWarning::EmptyName { index } => {
                write!(f, "field #{} has no name and cannot store data", index + 1)
            }
            SchemaWarning::EmptyLabel { index } => write!(f, "field #{} has no label", index + 1),
            SchemaWarning::DuplicateName { name, indexes } => {
                let positions: Vec<String> = indexes.iter().map(|i| format!("#{}", i + 1)).collect();
                write!(f, "name '{}' is used by fields {}", name, positions.join(", "))
            }
            SchemaWarning::NameNotSnakeCase { index, name } => write!(
                f,
                "field #{} name '{}' should be lowercase with underscores, no spaces",
                index + 1,
                name
            ),
            SchemaWarning::MissingOptions { index, name } => {
                write!(f, "field #{} '{}' offers no options", index + 1, name)
            }
        }
    }
}

fn snake_case() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[a-z][a-z0-9_]*$").ok())
        .as_ref()
}

/// Warnings for `schema`, in field order; duplicate-name warnings follow.
pub fn lint_schema(schema: &FormSchema) -> Vec<SchemaWarning> {
    let mut warnings = Vec::new();
    let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();
    let mut name_order: Vec<&str> = Vec::new();

    for (index, field) in schema.fields().iter().enumerate() {
        let name = field.name.as_str();
        if name.is_empty() {
            warnings.push(SchemaWarning::EmptyName { index });
        } else {
            if snake_case().is_some_and(|re| !re.is_match(name)) {
                warnings.push(SchemaWarning::NameNotSnakeCase {
                    index,
                    name: name.to_string(),
                });
            }
            let entry = by_name.entry(name).or_default();
            if entry.is_empty() {
                name_order.push(name);
            }
            entry.push(index);
        }
        if field.label.trim().is_empty() {
            warnings.push(SchemaWarning::EmptyLabel { index });
        }
        if field.kind.options().is_some_and(|o| o.is_empty()) {
            warnings.push(SchemaWarning::MissingOptions {
                index,
                name: name.to_string(),
            });
        }
    }

    for name in name_order {
        if let Some(indexes) = by_name.get(name).filter(|i| i.len() > 1) {
            warnings.push(SchemaWarning::DuplicateName {
                name: name.to_string(),
                indexes: indexes.clone(),
            });
        }
    }

    warnings
}
