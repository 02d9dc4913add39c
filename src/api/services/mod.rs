//! Services module - schema editing, the form catalog and the backend client.

pub mod api_client;
pub mod auth_service;
pub mod default_form;
pub mod form_catalog;
pub mod form_editor;
pub mod schema_builder;
pub mod schema_codec;
pub mod schema_lint;

// Re-export for convenience
pub use api_client::ApiClient;
pub use auth_service::token_expired;
pub use default_form::{DEFAULT_FORM_NAME, default_form_draft, default_form_schema};
pub use form_catalog::FormCatalog;
pub use form_editor::{EditSession, EditState, FormEditor, SchemaEditMode};
pub use schema_builder::{Direction, FieldPatch, SchemaBuilder};
pub use schema_codec::{
    RawSchemaEditor, SchemaParseError, from_text, options_text, parse_options, to_persisted,
    to_text,
};
pub use schema_lint::{SchemaWarning, lint_schema};
