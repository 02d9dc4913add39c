//! Unit tests for the visual schema builder.

use pfmo_admin::models::{FieldKind, FieldType, FormSchema, SchemaField};
use pfmo_admin::services::{Direction, FieldPatch, SchemaBuilder};

fn sample_schema() -> FormSchema {
    FormSchema::with_fields(vec![
        SchemaField::new("a", "A", FieldType::Text),
        SchemaField::new("b", "B", FieldType::Select).with_options(["x", "y"]),
        SchemaField::new("c", "C", FieldType::Number),
    ])
}

fn names(builder: &SchemaBuilder) -> Vec<String> {
    builder.schema().field_names().iter().map(|n| n.to_string()).collect()
}

#[test]
fn test_new_builder_is_empty() {
    let builder = SchemaBuilder::new();
    assert!(builder.is_empty());
    assert_eq!(builder.editing(), None);
}

#[test]
fn test_add_field_appends_blank_text_field_and_opens_it() {
    let mut builder = SchemaBuilder::from_schema(&sample_schema());
    let id = builder.add_field();

    assert_eq!(builder.len(), 4);
    assert_eq!(builder.position(id), Some(3));
    assert_eq!(builder.editing(), Some(id));

    let field = &builder.field(id).unwrap().field;
    assert_eq!(field.name, "");
    assert_eq!(field.label, "");
    assert_eq!(field.kind, FieldKind::Text);
    assert!(!field.required);
}

#[test]
fn test_field_count_tracks_adds_and_deletes() {
    let mut builder = SchemaBuilder::new();
    let mut adds = 0;
    let mut deletes = 0;

    let first = builder.add_field();
    let second = builder.add_field();
    let third = builder.add_field();
    adds += 3;

    builder.update_field(second, FieldPatch::default().name("second"));
    builder.move_field(0, Direction::Down);
    builder.move_field(2, Direction::Down);

    assert!(builder.delete_field(first));
    deletes += 1;
    assert!(!builder.delete_field(first));

    builder.add_field();
    adds += 1;
    builder.move_field(1, Direction::Up);
    assert!(builder.delete_field(third));
    deletes += 1;

    assert_eq!(builder.schema().fields().len(), adds - deletes);
}

#[test]
fn test_update_field_merges_patch() {
    let mut builder = SchemaBuilder::from_schema(&sample_schema());
    let id = builder.fields()[0].id;

    assert!(builder.update_field(
        id,
        FieldPatch::default()
            .label("Facility Name")
            .required(true)
            .placeholder("e.g. PHC Ikeja")
    ));

    let field = &builder.field(id).unwrap().field;
    assert_eq!(field.name, "a");
    assert_eq!(field.label, "Facility Name");
    assert!(field.required);
    assert_eq!(field.placeholder.as_deref(), Some("e.g. PHC Ikeja"));

    builder.update_field(id, FieldPatch::default().placeholder(""));
    assert_eq!(builder.field(id).unwrap().field.placeholder, None);
}

#[test]
fn test_update_unknown_field_is_rejected() {
    let mut builder = SchemaBuilder::from_schema(&sample_schema());
    let stranger = SchemaBuilder::new().add_field();

    assert!(!builder.update_field(stranger, FieldPatch::default().name("x")));
    assert_eq!(builder.schema(), sample_schema());
}

#[test]
fn test_changing_type_clears_options() {
    let mut builder = SchemaBuilder::from_schema(&sample_schema());
    let id = builder.fields()[1].id;

    builder.update_field(id, FieldPatch::default().field_type(FieldType::Radio));
    assert_eq!(builder.field(id).unwrap().field.kind, FieldKind::Radio(vec![]));

    builder.set_options_text(id, "one\ntwo");
    builder.update_field(id, FieldPatch::default().field_type(FieldType::Text));
    assert_eq!(builder.field(id).unwrap().field.kind.options(), None);

    // Same type again still resets.
    builder.update_field(id, FieldPatch::default().field_type(FieldType::Select));
    builder.set_options_text(id, "p\nq");
    builder.update_field(id, FieldPatch::default().field_type(FieldType::Select));
    assert_eq!(builder.field(id).unwrap().field.kind, FieldKind::Select(vec![]));
}

#[test]
fn test_type_and_options_in_one_patch() {
    let mut builder = SchemaBuilder::new();
    let id = builder.add_field();

    builder.update_field(
        id,
        FieldPatch::default()
            .field_type(FieldType::Select)
            .options(["Yes", "No"]),
    );
    assert_eq!(
        builder.field(id).unwrap().field.kind.options().unwrap(),
        ["Yes", "No"]
    );
}

#[test]
fn test_set_options_text_skips_blank_lines() {
    let mut builder = SchemaBuilder::from_schema(&sample_schema());
    let id = builder.fields()[1].id;

    builder.set_options_text(id, "Initial\n\n  \nFollow-up\nReassessment\n");
    assert_eq!(
        builder.field(id).unwrap().field.kind.options().unwrap(),
        ["Initial", "Follow-up", "Reassessment"]
    );

    // Plain fields ignore options.
    let text_id = builder.fields()[0].id;
    builder.set_options_text(text_id, "x");
    assert_eq!(builder.field(text_id).unwrap().field.kind, FieldKind::Text);
}

#[test]
fn test_move_field_swaps_neighbours() {
    let mut builder = SchemaBuilder::from_schema(&sample_schema());

    assert!(builder.move_field(0, Direction::Down));
    assert_eq!(names(&builder), vec!["b", "a", "c"]);

    assert!(builder.move_field(2, Direction::Up));
    assert_eq!(names(&builder), vec!["b", "c", "a"]);
}

#[test]
fn test_move_field_past_either_end_is_noop() {
    let mut builder = SchemaBuilder::from_schema(&sample_schema());

    assert!(!builder.move_field(0, Direction::Up));
    assert!(!builder.move_field(2, Direction::Down));
    assert!(!builder.move_field(7, Direction::Up));
    assert_eq!(names(&builder), vec!["a", "b", "c"]);
}

#[test]
fn test_delete_field_closes_editor() {
    let mut builder = SchemaBuilder::from_schema(&sample_schema());
    let kept = builder.fields()[0].id;
    let removed = builder.fields()[2].id;

    builder.toggle_editing(kept);
    assert_eq!(builder.editing(), Some(kept));

    assert!(builder.delete_field(removed));
    assert_eq!(builder.editing(), None);
    assert_eq!(names(&builder), vec!["a", "b"]);
}

#[test]
fn test_toggle_editing() {
    let mut builder = SchemaBuilder::from_schema(&sample_schema());
    let a = builder.fields()[0].id;
    let b = builder.fields()[1].id;

    builder.toggle_editing(a);
    assert_eq!(builder.editing(), Some(a));
    builder.toggle_editing(b);
    assert_eq!(builder.editing(), Some(b));
    builder.toggle_editing(b);
    assert_eq!(builder.editing(), None);
}

#[test]
fn test_from_schema_round_trips_fields_and_extra_keys() {
    let mut schema = sample_schema();
    schema
        .extra
        .insert("title".to_string(), serde_json::json!("Clinic"));

    let builder = SchemaBuilder::from_schema(&schema);
    assert_eq!(builder.schema(), schema);

    let again = SchemaBuilder::from_schema(&schema);
    assert_ne!(builder.fields()[0].id, again.fields()[0].id);
}

#[test]
fn test_every_mutation_is_published() {
    let mut builder = SchemaBuilder::new();
    let mut changes = builder.subscribe();
    assert!(!changes.has_changed().unwrap());

    let id = builder.add_field();
    assert!(changes.has_changed().unwrap());
    assert_eq!(changes.borrow_and_update().fields().len(), 1);

    builder.update_field(id, FieldPatch::default().name("pfmo_name"));
    assert_eq!(changes.borrow_and_update().field_names(), vec!["pfmo_name"]);

    // Opening or closing the editor is not a schema change.
    builder.toggle_editing(id);
    assert!(!changes.has_changed().unwrap());

    builder.delete_field(id);
    assert!(changes.borrow_and_update().fields().is_empty());
}
