//! Unit tests for schema text encoding and the raw-text editor.

use pfmo_admin::models::{FieldDefinition, FieldType, FormSchema, SchemaField};
use pfmo_admin::services::{
    RawSchemaEditor, SchemaBuilder, from_text, options_text, parse_options, to_persisted, to_text,
};
use serde_json::{Value, json};

#[test]
fn test_to_persisted_options_only_for_choice_fields() {
    let fields = vec![
        FieldDefinition::from_persisted(SchemaField::new("name", "Name", FieldType::Text)),
        FieldDefinition::from_persisted(
            SchemaField::new("zone", "Zone", FieldType::Select).with_options(["b", "a", "c"]),
        ),
        FieldDefinition::from_persisted(
            SchemaField::new("ok", "OK?", FieldType::Radio).with_options(Vec::<String>::new()),
        ),
    ];

    let value = serde_json::to_value(to_persisted(&fields)).unwrap();
    let persisted = value["fields"].as_array().unwrap();

    assert!(persisted[0].get("options").is_none());
    assert_eq!(persisted[1]["options"], json!(["b", "a", "c"]));
    assert_eq!(persisted[2]["options"], json!([]));
}

#[test]
fn test_to_persisted_of_no_fields_has_empty_list() {
    let schema = to_persisted(&[]);
    assert_eq!(serde_json::to_value(&schema).unwrap(), json!({"fields": []}));
}

#[test]
fn test_capitalised_field_type_in_text_is_accepted() {
    let schema = from_text(
        r#"{"fields": [{"name": "zone", "label": "Zone", "type": "Select", "options": ["North", "South"]}]}"#,
    )
    .unwrap();

    assert_eq!(schema.fields()[0].field_type(), FieldType::Select);
    assert!(to_text(&schema).contains("\"type\": \"select\""));
}

#[test]
fn test_blank_text_is_empty_schema() {
    assert_eq!(from_text("").unwrap(), FormSchema::default());
    assert_eq!(from_text("  \n\t").unwrap(), FormSchema::default());
    assert_eq!(to_text(&from_text("").unwrap()), "{}");
}

#[test]
fn test_malformed_text_reports_position() {
    let err = from_text("{invalid").unwrap_err();
    assert_eq!(err.line, 1);
    assert!(err.column > 0);
    assert!(err.to_string().starts_with("Invalid schema at line 1"));
}

#[test]
fn test_wrong_shape_is_rejected() {
    assert!(from_text(r#"{"fields": "nope"}"#).is_err());
    assert!(from_text(r#"{"fields": [{"name": "a", "type": "slider"}]}"#).is_err());
    assert!(from_text("[]").is_err());
}

#[test]
fn test_text_round_trip() {
    let mut builder = SchemaBuilder::new();
    let a = builder.add_field();
    builder.update_field(
        a,
        pfmo_admin::services::FieldPatch::default()
            .name("a")
            .label("A")
            .field_type(FieldType::Text)
            .required(true),
    );
    let b = builder.add_field();
    builder.update_field(
        b,
        pfmo_admin::services::FieldPatch::default()
            .name("b")
            .label("B")
            .field_type(FieldType::Select)
            .options(["x", "y"]),
    );

    let schema = builder.schema();
    let text = to_text(&schema);
    let parsed = from_text(&text).unwrap();
    assert_eq!(parsed, schema);

    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        value,
        json!({
            "fields": [
                {"name": "a", "label": "A", "type": "text", "required": true},
                {"name": "b", "label": "B", "type": "select", "required": false, "options": ["x", "y"]}
            ]
        })
    );
}

#[test]
fn test_to_text_is_pretty_printed() {
    let schema = FormSchema::with_fields(vec![SchemaField::new("a", "A", FieldType::Date)]);
    let text = to_text(&schema);
    assert!(text.contains('\n'));
    assert!(text.contains("  \"fields\""));
}

#[test]
fn test_parse_options_keeps_non_blank_lines_in_order() {
    assert_eq!(parse_options("Yes\n\nNo\n  \nMaybe"), vec!["Yes", "No", "Maybe"]);
    assert!(parse_options("").is_empty());
    assert_eq!(options_text(&["Yes".to_string(), "No".to_string()]), "Yes\nNo");
}

#[test]
fn test_raw_editor_starts_from_value() {
    let schema = FormSchema::with_fields(vec![SchemaField::new("a", "A", FieldType::Text)]);
    let editor = RawSchemaEditor::new(schema.clone());

    assert_eq!(editor.value(), &schema);
    assert_eq!(editor.text(), to_text(&schema));
    assert!(editor.error().is_none());
}

#[test]
fn test_raw_editor_keeps_last_good_value() {
    let original = FormSchema::with_fields(vec![SchemaField::new("a", "A", FieldType::Text)]);
    let mut editor = RawSchemaEditor::new(original.clone());

    assert!(!editor.set_text("{invalid"));
    assert_eq!(editor.text(), "{invalid");
    assert_eq!(editor.value(), &original);
    assert!(editor.error().is_some());

    assert!(editor.set_text(r#"{"fields": [{"name": "b", "label": "B", "type": "email"}]}"#));
    assert!(editor.error().is_none());
    assert_eq!(editor.value().field_names(), vec!["b"]);

    assert!(!editor.set_text(r#"{"fields": [{"name": "c""#));
    assert_eq!(editor.value().field_names(), vec!["b"]);
}

#[test]
fn test_raw_editor_blank_text_clears_schema() {
    let original = FormSchema::with_fields(vec![SchemaField::new("a", "A", FieldType::Text)]);
    let mut editor = RawSchemaEditor::new(original);

    assert!(editor.set_text(""));
    assert!(editor.into_value().is_empty());
}
