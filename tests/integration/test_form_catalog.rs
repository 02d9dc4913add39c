//! Integration tests for the form catalog against an in-memory backend.

mod common;

use common::{FakeBackend, HAS_SUBMISSIONS, form};
use pfmo_admin::models::{FieldType, FormDraft, FormSchema, RecordId, SchemaField};
use pfmo_admin::services::{DEFAULT_FORM_NAME, FormCatalog, default_form_schema};
use pfmo_admin::storage::ClientError;
use std::sync::Arc;
use std::sync::atomic::Ordering;

fn catalog_with(forms: Vec<pfmo_admin::models::Form>) -> (Arc<FakeBackend>, Arc<FormCatalog>) {
    let backend = Arc::new(FakeBackend::with_forms(forms));
    let catalog = Arc::new(FormCatalog::new(backend.clone()));
    (backend, catalog)
}

fn names(forms: &[pfmo_admin::models::Form]) -> Vec<&str> {
    forms.iter().map(|f| f.name.as_str()).collect()
}

#[tokio::test]
async fn test_list_hides_deleted_and_keeps_backend_order() {
    let mut deleted = form(2, "Old Survey");
    deleted.is_deleted = true;
    let mut inactive = form(3, "Paused");
    inactive.is_active = false;
    let (_, catalog) = catalog_with(vec![form(1, "Clinic Visit"), deleted, inactive]);

    let forms = catalog.list().await.unwrap();
    assert_eq!(names(&forms), vec!["Clinic Visit", "Paused"]);
    assert_eq!(names(&catalog.forms()), vec!["Clinic Visit", "Paused"]);
    assert!(catalog.find(&RecordId::Int(2)).is_none());
}

#[tokio::test]
async fn test_create_refreshes_list() {
    let (backend, catalog) = catalog_with(vec![form(1, "Clinic Visit")]);

    let draft = FormDraft::new(
        "Follow-up",
        "1.0",
        FormSchema::with_fields(vec![SchemaField::new("notes", "Notes", FieldType::Textarea)]),
    );
    let created = catalog.create(&draft).await.unwrap();

    assert_eq!(created.id, RecordId::Int(2));
    assert_eq!(names(&catalog.forms()), vec!["Clinic Visit", "Follow-up"]);
    assert_eq!(
        backend.stored(&created.id).unwrap().form_schema,
        draft.form_schema
    );
}

#[tokio::test]
async fn test_create_requires_name_and_version() {
    let (backend, catalog) = catalog_with(vec![]);

    let err = catalog
        .create(&FormDraft::new("  ", "1.0", FormSchema::default()))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidInput(_)));

    let err = catalog
        .create(&FormDraft::new("Survey", "", FormSchema::default()))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidInput(_)));

    assert_eq!(backend.create_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_duplicate_field_names_are_not_rejected() {
    let (backend, catalog) = catalog_with(vec![]);
    let schema = FormSchema::with_fields(vec![
        SchemaField::new("facility_name", "Facility Name", FieldType::Text),
        SchemaField::new("facility_name", "Facility Name (again)", FieldType::Text),
    ]);

    let created = catalog
        .create(&FormDraft::new("Duplicates", "1.0", schema.clone()))
        .await
        .unwrap();

    assert_eq!(
        backend.stored(&created.id).unwrap().form_schema.field_names(),
        vec!["facility_name", "facility_name"]
    );
}

#[tokio::test]
async fn test_update_replaces_record() {
    let (backend, catalog) = catalog_with(vec![form(1, "Clinic Visit")]);
    let current = catalog.get(&RecordId::Int(1)).await.unwrap();

    let mut draft = FormDraft::from_form(&current);
    draft.version = "1.1".to_string();
    draft.form_schema = default_form_schema();
    let updated = catalog.update(&current.id, &draft).await.unwrap();

    assert_eq!(updated.version, "1.1");
    assert_eq!(backend.stored(&current.id).unwrap().form_schema.fields().len(), 20);
    assert_eq!(catalog.find(&current.id).unwrap().version, "1.1");
}

#[tokio::test]
async fn test_update_rejection_is_passed_through() {
    let (_, catalog) = catalog_with(vec![]);
    let err = catalog
        .update(&RecordId::Int(9), &FormDraft::new("X", "1.0", FormSchema::default()))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Form not found");
}

#[tokio::test]
async fn test_get_unknown_form() {
    let (_, catalog) = catalog_with(vec![form(1, "Clinic Visit")]);
    let err = catalog.get(&RecordId::Int(5)).await.unwrap_err();
    assert_eq!(
        err,
        ClientError::NotFound {
            entity_type: "form".to_string(),
            entity_id: "5".to_string(),
        }
    );
}

#[tokio::test]
async fn test_hard_delete_with_submissions_is_refused() {
    let (backend, catalog) = catalog_with(vec![form(1, "Clinic Visit"), form(2, "Follow-up")]);
    backend.mark_has_submissions(RecordId::Int(1));
    catalog.list().await.unwrap();
    let calls_before = backend.list_calls.load(Ordering::SeqCst);

    let err = catalog.delete(&RecordId::Int(1), true).await.unwrap_err();

    assert_eq!(err.to_string(), HAS_SUBMISSIONS);
    assert!(matches!(err, ClientError::Rejected { status: 400, .. }));
    // No refresh and no local change.
    assert_eq!(backend.list_calls.load(Ordering::SeqCst), calls_before);
    assert_eq!(names(&catalog.forms()), vec!["Clinic Visit", "Follow-up"]);
    assert_eq!(
        names(&catalog.list().await.unwrap()),
        vec!["Clinic Visit", "Follow-up"]
    );
}

#[tokio::test]
async fn test_soft_delete_hides_form_but_keeps_record() {
    let (backend, catalog) = catalog_with(vec![form(1, "Clinic Visit"), form(2, "Follow-up")]);
    backend.mark_has_submissions(RecordId::Int(1));

    catalog.delete(&RecordId::Int(1), false).await.unwrap();

    assert_eq!(names(&catalog.forms()), vec!["Follow-up"]);
    assert_eq!(names(&catalog.list().await.unwrap()), vec!["Follow-up"]);
    let stored = backend.stored(&RecordId::Int(1)).unwrap();
    assert!(stored.is_deleted);
}

#[tokio::test]
async fn test_hard_delete_removes_record() {
    let (backend, catalog) = catalog_with(vec![form(1, "Clinic Visit"), form(2, "Follow-up")]);

    catalog.delete(&RecordId::Int(2), true).await.unwrap();

    assert_eq!(names(&catalog.forms()), vec!["Clinic Visit"]);
    assert!(backend.stored(&RecordId::Int(2)).is_none());
}

#[tokio::test]
async fn test_failed_refresh_keeps_mutation_result() {
    let (backend, catalog) = catalog_with(vec![form(1, "Clinic Visit")]);
    catalog.list().await.unwrap();
    backend.fail_lists.store(true, Ordering::SeqCst);

    let created = catalog
        .create(&FormDraft::new("Follow-up", "1.0", FormSchema::default()))
        .await
        .unwrap();

    assert_eq!(created.name, "Follow-up");
    // The view is stale until the next successful fetch.
    assert_eq!(names(&catalog.forms()), vec!["Clinic Visit"]);

    let err = catalog.list().await.unwrap_err();
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_create_default_when_absent() {
    let (backend, catalog) = catalog_with(vec![form(1, "Clinic Visit")]);
    let mut asked = false;

    let created = catalog
        .create_default(|_| {
            asked = true;
            false
        })
        .await
        .unwrap()
        .unwrap();

    assert!(!asked);
    assert_eq!(created.name, DEFAULT_FORM_NAME);
    assert_eq!(created.version, "2.0");
    assert!(created.is_active);
    assert_eq!(
        backend.stored(&created.id).unwrap().form_schema,
        default_form_schema()
    );
}

#[tokio::test]
async fn test_create_default_asks_before_duplicating() {
    let (backend, catalog) = catalog_with(vec![form(4, DEFAULT_FORM_NAME)]);

    let declined = catalog
        .create_default(|existing| {
            assert_eq!(existing.id, RecordId::Int(4));
            false
        })
        .await
        .unwrap();
    assert!(declined.is_none());
    assert_eq!(backend.create_calls.load(Ordering::SeqCst), 0);

    let accepted = catalog.create_default(|_| true).await.unwrap();
    assert!(accepted.is_some());
    assert_eq!(
        names(&catalog.forms()),
        vec![DEFAULT_FORM_NAME, DEFAULT_FORM_NAME]
    );
}

#[tokio::test]
async fn test_create_default_ignores_deleted_stock_form() {
    let mut deleted = form(1, DEFAULT_FORM_NAME);
    deleted.is_deleted = true;
    let (_, catalog) = catalog_with(vec![deleted]);

    let created = catalog
        .create_default(|_| panic!("should not ask"))
        .await
        .unwrap();
    assert!(created.is_some());
}

#[tokio::test]
async fn test_superseded_fetch_is_discarded() {
    let (backend, catalog) = catalog_with(vec![form(1, "Clinic Visit")]);
    let (entered, release) = backend.hold_next_list();

    // First fetch takes its snapshot, then stalls.
    let slow = tokio::spawn({
        let catalog = catalog.clone();
        async move { catalog.list().await }
    });
    entered.await.unwrap();

    backend.forms.lock().unwrap().push(form(2, "Follow-up"));
    let fresh = catalog.list().await.unwrap();
    assert_eq!(names(&fresh), vec!["Clinic Visit", "Follow-up"]);

    release.send(()).unwrap();
    let late = slow.await.unwrap().unwrap();

    assert_eq!(names(&late), vec!["Clinic Visit", "Follow-up"]);
    assert_eq!(names(&catalog.forms()), vec!["Clinic Visit", "Follow-up"]);
}
